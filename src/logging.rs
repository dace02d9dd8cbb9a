//! Diagnostic logging setup.
//!
//! Progress lines go to stdout; tracing diagnostics go to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV_VAR: &str = "AUTOPUSH_LOG";

/// Build the log filter: `AUTOPUSH_LOG` wins, then `--verbose`, then warnings only.
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("autopush=debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Install the global stderr subscriber.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
