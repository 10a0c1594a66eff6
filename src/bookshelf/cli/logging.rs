use super::setup::LogLevel;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs MUST go to stderr so tables on stdout
/// stay pipeable.
///
/// `RUST_LOG` wins when set; otherwise the level from the command line applies
/// to the `bookshelf` crate only.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("bookshelf={}", level.to_filter_directive()))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
