/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

/// Logging subsystem errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum LogError {
    #[error("Invalid log template at byte {position}: {reason}")]
    #[diagnostic(
        code(logging::invalid_template),
        help("Known placeholders: timestamp, color, level, reset, message, attrs. Double a brace to emit it literally.")
    )]
    Template { position: usize, reason: String },

    #[error("Logger is not initialized")]
    #[diagnostic(
        code(logging::not_initialized),
        help("Call init() before logging, or obtain the logger from App::logger().")
    )]
    NotInitialized,

    #[error("Logger is already initialized")]
    #[diagnostic(
        code(logging::already_initialized),
        help("Sinks must be registered before init().")
    )]
    AlreadyInitialized,

    #[error("Logger has been shut down")]
    #[diagnostic(
        code(logging::closed),
        help("A logger cannot be restarted. Request a fresh one from the owning App.")
    )]
    Closed,

    #[error("Failed to start logger worker: {0}")]
    #[diagnostic(code(logging::worker_spawn_failed))]
    WorkerSpawn(String),

    #[error("Logger worker panicked")]
    #[diagnostic(
        code(logging::worker_panicked),
        help("Queued records may have been lost. Check sink implementations for panics.")
    )]
    WorkerPanicked,

    #[error("Sink write failed: {0}")]
    #[diagnostic(code(logging::write_failed))]
    Write(String),

    #[error("Sink shutdown failed: {0}")]
    #[diagnostic(
        code(logging::shutdown_failed),
        help("Buffered log data may not have reached its destination.")
    )]
    Shutdown(String),

    #[error("Failed to format timestamp: {0}")]
    #[diagnostic(code(logging::timestamp_format))]
    Timestamp(String),

    #[error("Failed to encode attributes: {0}")]
    #[diagnostic(code(logging::attr_encoding))]
    Attrs(String),
}

impl LogError {
    pub fn template(position: usize, reason: impl Into<String>) -> Self {
        Self::Template {
            position,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::Write(err.to_string())
    }
}

impl From<time::error::Format> for LogError {
    fn from(err: time::error::Format) -> Self {
        LogError::Timestamp(err.to_string())
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Attrs(err.to_string())
    }
}

pub type LogResult<T> = Result<T, LogError>;
