//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or every
/// converted character when `verbose` is on.
pub fn init(verbose: bool) {
    let default = if verbose { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
