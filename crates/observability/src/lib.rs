//! Tracing setup and the `Logger` seam used by application code.

/// Initialize process-wide tracing with the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    self::tracing::init(format);
}

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Message sinks handed to application code.
pub mod logger;

pub use logger::{LogLevel, LogRecord, Logger, RecordingLogger, TracingLogger};
pub use self::tracing::{LogFormat, ParseLogFormatError};
