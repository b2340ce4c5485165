use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Log to stderr so diagnostics never mix with the playlist console on stdout.
///
/// `RUST_LOG` wins over the configured level.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|e| {
            eprintln!("m3u-builder: invalid log level {:?}, using warn: {e}", settings.level);
            EnvFilter::new("warn")
        });

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
