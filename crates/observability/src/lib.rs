//! Process-wide logging setup shared by the binaries.

/// Initialize tracing for the process.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

pub mod tracing;
