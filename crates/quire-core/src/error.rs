//! Error types for Quire.
//!
//! A single error enum is shared by every library crate in the workspace so
//! that content parsing, index building, and profile validation failures all
//! surface through the same `Result` alias.

use std::path::{Path, PathBuf};

/// Result type alias for Quire operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Quire operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error, optionally tied to the path being accessed.
    #[error("I/O error{}: {source}", .path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    Io {
        /// Path involved in the failed operation, if known
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Content could not be parsed (frontmatter, JSON, TOML, dates).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// A requested resource does not exist.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Identifier that was looked up
        id: String,
        /// Kind of resource (e.g. "article", "content directory")
        resource_type: String,
    },

    /// Data failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field path that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A higher-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    /// Creates an I/O error without path context.
    pub fn io(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }

    /// Creates an I/O error for the given path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a not-found error for a resource of the given type.
    pub fn not_found<I, T>(id: I, resource_type: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Error::NotFound {
            id: id.into(),
            resource_type: resource_type.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field path.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new operation error.
    pub fn operation<S: Into<String>>(message: S) -> Self {
        Error::Operation(message.into())
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
