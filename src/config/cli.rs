use crate::config::PickerConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "media-picker")]
#[command(about = "Replay a scripted media picker session and print the host callbacks")]
pub struct CliConfig {
    #[arg(long, help = "Picker configuration (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Session script, one action per line")]
    pub script: PathBuf,

    #[arg(long, help = "Override camera.video_limit (0 = unlimited)")]
    pub video_limit: Option<usize>,

    #[arg(long, help = "Override camera.image_limit (0 = unlimited)")]
    pub image_limit: Option<usize>,

    #[arg(long, help = "Start without photo library access")]
    pub deny_photos: bool,

    #[arg(long, help = "Start without camera access")]
    pub deny_camera: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_log: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the TOML file (or defaults) and applies command line overrides.
    pub fn picker_config(&self) -> Result<PickerConfig> {
        let mut config = match &self.config {
            Some(path) => PickerConfig::from_file(path)?,
            None => PickerConfig::default(),
        };

        if let Some(limit) = self.video_limit {
            config.camera.video_limit = limit;
        }
        if let Some(limit) = self.image_limit {
            config.camera.image_limit = limit;
        }

        Ok(config)
    }
}
