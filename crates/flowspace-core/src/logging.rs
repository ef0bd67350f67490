//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
//! the verbosity-derived default.

use tracing_subscriber::EnvFilter;

pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "flowspace=warn,flowspace_core=warn",
        1 => "flowspace=info,flowspace_core=info",
        _ => "flowspace=debug,flowspace_core=debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
