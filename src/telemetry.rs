//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global formatting subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed, which
/// makes the call safe to repeat from tests.
#[must_use]
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
