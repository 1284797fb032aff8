//! `Logger`: the info/error sink application code reports outcomes through.
//!
//! Application code takes a `Logger` explicitly instead of reaching for the global
//! subscriber, so tests can swap in [`RecordingLogger`] and assert on exact lines.

use std::sync::{Arc, Mutex};

/// Informational and error message sink.
///
/// Implementations must not panic.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}

impl<L> Logger for Arc<L>
where
    L: Logger + ?Sized,
{
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

impl<L> Logger for &L
where
    L: Logger + ?Sized,
{
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Forwards to the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    /// Tag every message with `component` as a structured field.
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(component = self.component, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(component = self.component, "{message}");
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every line in memory, for assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Messages logged at `level`, oldest first.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        // A poisoned lock drops the line rather than panicking.
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_logger_keeps_levels_apart() {
        let logger = RecordingLogger::new();
        logger.info("one");
        logger.error("two");
        logger.info("three");

        assert_eq!(logger.messages(LogLevel::Info), vec!["one", "three"]);
        assert_eq!(logger.messages(LogLevel::Error), vec!["two"]);
        assert_eq!(logger.records().len(), 3);
    }

    #[test]
    fn shared_logger_sees_writes_from_clones() {
        let logger = Arc::new(RecordingLogger::new());
        let handle = Arc::clone(&logger);
        handle.error("boom");
        assert_eq!(logger.messages(LogLevel::Error), vec!["boom"]);
    }

    #[test]
    fn tracing_logger_without_subscriber_does_not_panic() {
        let logger = TracingLogger::new("test");
        logger.info("hello");
        logger.error("world");
    }
}
