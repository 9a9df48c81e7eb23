//! Log output for the CLI.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter directive, e.g. `purse=debug`.
pub const LOG_ENV: &str = "PURSE_LOG";

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. `verbose` overrides whatever `PURSE_LOG` says.
pub fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let stderr_log = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::registry().with(filter).with(stderr_log).try_init();
}
