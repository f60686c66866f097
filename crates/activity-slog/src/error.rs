//! Error types for activity-slog.
//!
//! This module defines all error types used throughout the activity-slog crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for activity-slog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Activity Errors ===
    /// A display index did not point at a log entry.
    ///
    /// Shown to the user as a 1-based position.
    #[error("no log entry #{} (log has {len} entries)", .index + 1)]
    LogEntryNotFound {
        /// The requested display index.
        index: usize,
        /// Number of entries in the log.
        len: usize,
    },

    /// A tapped label is not on the button grid.
    #[error("no button labeled \"{label}\"")]
    UnknownButton {
        /// The label that was tapped.
        label: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for activity-slog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an unknown button error.
    #[must_use]
    pub fn unknown_button(label: impl Into<String>) -> Self {
        Self::UnknownButton {
            label: label.into(),
        }
    }

    /// Check if this error was caused by user input rather than the system.
    ///
    /// The binary reports these without a backtrace-style chain.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::LogEntryNotFound { .. } | Self::UnknownButton { .. }
        )
    }
}
