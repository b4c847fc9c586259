#[cfg(feature = "cli")]
pub mod cli;

use crate::core::policy::{
    DEFAULT_IMAGE_LIMIT, DEFAULT_MAXIMUM_VIDEO_DURATION_SECS, DEFAULT_VIDEO_LIMIT,
};
use crate::domain::model::Tab;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PickerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub tabs: TabsConfig,
    pub camera: CameraConfig,
    pub video_editor: VideoEditorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    pub show: Vec<Tab>,
    pub initial: Option<Tab>,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            show: vec![Tab::Image, Tab::Camera, Tab::Video],
            initial: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// 0 means unlimited.
    pub video_limit: usize,
    /// 0 means unlimited.
    pub image_limit: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            video_limit: DEFAULT_VIDEO_LIMIT,
            image_limit: DEFAULT_IMAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoEditorConfig {
    pub maximum_duration_seconds: u64,
}

impl Default for VideoEditorConfig {
    fn default() -> Self {
        Self {
            maximum_duration_seconds: DEFAULT_MAXIMUM_VIDEO_DURATION_SECS,
        }
    }
}

impl PickerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML, expanding `${VAR}` references from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var pattern")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl ConfigProvider for PickerConfig {
    fn tabs_to_show(&self) -> &[Tab] {
        &self.tabs.show
    }

    fn initial_tab(&self) -> Option<Tab> {
        self.tabs.initial
    }

    fn video_limit(&self) -> usize {
        self.camera.video_limit
    }

    fn image_limit(&self) -> usize {
        self.camera.image_limit
    }

    fn maximum_video_duration_secs(&self) -> u64 {
        self.video_editor.maximum_duration_seconds
    }
}

impl Validate for PickerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_tabs("tabs.show", &self.tabs.show)?;

        if let Some(initial) = self.tabs.initial {
            if !self.tabs.show.contains(&initial) {
                return Err(PickerError::InvalidConfigValueError {
                    field: "tabs.initial".to_string(),
                    value: initial.as_str().to_string(),
                    reason: "Initial tab must be one of the shown tabs".to_string(),
                });
            }
        }

        validation::validate_positive_number(
            "video_editor.maximum_duration_seconds",
            self.video_editor.maximum_duration_seconds,
            1,
        )
    }
}
