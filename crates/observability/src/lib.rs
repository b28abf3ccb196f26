//! Tracing and logging setup shared by router hosts.

use switchyard_core::RouterConfig;

/// Initialize process-wide tracing/logging from the router configuration.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &RouterConfig) {
    tracing::init(config);
}

/// Tracing configuration (filters, formats).
pub mod tracing;

/// Logging sink subscriber.
pub mod sink;

pub use sink::TraceSubscriber;
