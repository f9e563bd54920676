//! Tracing setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,storefront=debug,sqlx=warn";

/// Installs a fmt subscriber filtered by `RUST_LOG`, or [`DEFAULT_FILTER`].
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
