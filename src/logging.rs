use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NOTIFY_END_LOG";

/// Log to stderr, filtered by $NOTIFY_END_LOG (default: warn).
/// stdout stays clean for dry-run output.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); that's fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
