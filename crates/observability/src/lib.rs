//! Process-wide logging setup for the storefront binaries.

/// Subscriber configuration (filters, formatting).
pub mod tracing;

/// Initialize logging with the default `info` filter.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}
