//! Tracing subscriber initialisation for binaries and tests.

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a formatted subscriber driven by `RUST_LOG`.
///
/// Calling it again after a subscriber has been installed has no effect.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        debug!("tracing subscriber already installed");
    }
}
