use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TODO_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Send diagnostics to stderr, filtered by `TODO_LOG` (default `warn`).
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
