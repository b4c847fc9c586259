use clap::Parser;
use media_picker::app::script::parse_script_file;
use media_picker::utils::logger::{self, LogFormat};
use media_picker::utils::validation::Validate;
use media_picker::{
    CliConfig, MediaKind, Phase, PickerController, PickerSession, RecordingDelegate,
    SessionMessage, StackPreview, StaticPermissions,
};
use std::rc::Rc;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let format = if cli.json_log {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.picker_config()?;
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let steps = parse_script_file(&cli.script)?;
    tracing::info!("Loaded {} script step(s) from {}", steps.len(), cli.script.display());

    let permissions = StaticPermissions::new(!cli.deny_photos, !cli.deny_camera);
    let mut controller =
        PickerController::new(&config, RecordingDelegate::default(), permissions.clone());

    let image_strip = Rc::new(StackPreview::new(MediaKind::Image));
    let video_strip = Rc::new(StackPreview::new(MediaKind::Video));
    controller.cart_mut().add_observer(&image_strip);
    controller.cart_mut().add_observer(&video_strip);

    let phase = controller.load();
    tracing::info!("Picker opened ({})", phase);

    let (mut session, handle) = PickerSession::new(controller);

    // Feed the script from another task, the way library loaders would.
    let feeder = tokio::spawn(async move {
        for step in steps {
            if matches!(step, SessionMessage::PermissionsGranted) {
                permissions.grant_all();
            }
            if handle.send(step).is_err() {
                break;
            }
            tokio::task::yield_now().await;
        }
    });

    let span = tracing::info_span!("session", script = %cli.script.display());
    let phase = session.run().instrument(span).await;
    feeder.await?;

    for call in session.controller().delegate().calls() {
        println!("{}", serde_json::to_string(&call)?);
    }

    let images = image_strip.state();
    let videos = video_strip.state();
    tracing::info!(
        "Stack preview: {} image(s), {} video(s), {} rejected message(s)",
        images.count,
        videos.count,
        session.rejected()
    );

    match phase {
        Phase::Finished(outcome) => tracing::info!("Picker finished: {:?}", outcome),
        other => tracing::warn!("Script ended without a terminal action ({})", other),
    }

    let mut controller = session.into_controller();
    println!("{}", serde_json::to_string(&controller.cart().selection())?);
    controller.teardown();
    Ok(())
}
