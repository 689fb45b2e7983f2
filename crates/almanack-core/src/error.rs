//! Error types for the almanack service.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the almanack service.
#[derive(Error, Debug)]
pub enum Error {
    /// A request failed basic validation (missing or malformed field).
    #[error("{message}")]
    Validation {
        /// Message exposed to the caller.
        message: String,
    },

    /// No writer row matched the requested id.
    #[error("Writer not found")]
    WriterNotFound,

    /// The HTTP method is not supported by the writers resource.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The database rejected or failed an operation.
    #[error("Database error: {message}")]
    Database {
        /// Error message from the driver.
        message: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Returns `true` if this error was caused by the caller's request
    /// rather than by the service or its store.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::WriterNotFound | Self::MethodNotAllowed
        )
    }

    /// Creates a validation error with the given caller-facing message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a database error with the given message.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Creates a configuration error with the given message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
