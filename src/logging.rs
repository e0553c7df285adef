//! Logging initialization
//!
//! Diagnostics go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize tracing for the process
///
/// `RUST_LOG` takes precedence over the verbosity flag. Calling this more
/// than once is a no-op.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
