//! Process-wide logging setup.

pub mod tracing;

pub use tracing::LogFormat;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
