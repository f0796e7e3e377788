//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.
//! `MARVIN_LOG` accepts any `EnvFilter` directive and wins over `--verbose`.

use tracing_subscriber::EnvFilter;

pub const ENV_VAR: &str = "MARVIN_LOG";

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "marvin=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
