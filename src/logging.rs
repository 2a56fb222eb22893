//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `mdjournal=info`)
pub const LOG_ENV_VAR: &str = "MDJOURNAL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
