use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// One JSON object per line, for hosts that ship picker logs elsewhere.
    Json,
}

/// Filter used when `RUST_LOG` is unset. Verbose sessions also show cart
/// mutations, which are logged at debug level.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "media_picker=debug,warn"
    } else {
        "media_picker=info,warn"
    }
}

/// Logs go to stderr so stdout carries only the delegate callbacks.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json().with_current_span(true))
            .init(),
    }
}
