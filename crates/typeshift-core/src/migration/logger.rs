//! Injected loggers for the migration engine.
//!
//! The processors never log through global state: they hold an
//! `Arc<dyn MigrationLogger>` that defaults to [`NullLogger`].

use parking_lot::Mutex;
use tracing::Level;

/// Sink for migration progress messages.
pub trait MigrationLogger: Send + Sync {
    /// Record a message at the given level.
    fn log(&self, level: Level, message: &str);

    /// Record an informational message.
    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    /// Record a debug message.
    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    /// Record a warning.
    fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl MigrationLogger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

/// Forwards messages to `tracing` under the `typeshift::migration` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl MigrationLogger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "typeshift::migration", "{}", message),
            Level::WARN => tracing::warn!(target: "typeshift::migration", "{}", message),
            Level::INFO => tracing::info!(target: "typeshift::migration", "{}", message),
            Level::DEBUG => tracing::debug!(target: "typeshift::migration", "{}", message),
            _ => tracing::trace!(target: "typeshift::migration", "{}", message),
        }
    }
}

/// A buffered log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
}

/// Collects messages so a front end can list them after a run.
#[derive(Debug, Default)]
pub struct BufferingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferingLogger {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the buffered entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Buffered messages at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Drain the buffer.
    pub fn clean_logs(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl MigrationLogger for BufferingLogger {
    fn log(&self, level: Level, message: &str) {
        self.entries.lock().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}
