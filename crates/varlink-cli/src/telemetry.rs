//! Tracing initialisation.
//!
//! The filter comes from `VARLINK_LOG` and output goes to stderr, so
//! nothing is emitted unless a user opts in. Completion mode never calls
//! this at all: completion output is parsed by the shell.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter.
pub const LOG_VARIABLE: &str = "VARLINK_LOG";

/// Installs the global subscriber; safe to call more than once.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
