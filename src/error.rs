//! Error types and handling infrastructure for rtail.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! the library error type. The binary wraps it with `anyhow` for context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors name the path, requested count or limit involved
//! - **Distinguishable failures**: A missing file is never reported as a generic I/O error
//! - **No partial results**: Every variant replaces the result entirely

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rtail operations.
#[derive(Error, Debug)]
pub enum RtailError {
    /// Bad input from the caller (blank path, line count out of range, not a file)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied opening or reading the file
    #[error("Permission denied accessing file: {path}")]
    AccessDenied { path: PathBuf },

    /// The caller cancelled the extraction before it finished
    #[error("Operation cancelled")]
    Cancelled,

    /// Any other I/O failure, surfaced without retry
    #[error("File operation failed: {message}")]
    Unexpected {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Standard Result type for rtail operations.
pub type Result<T> = std::result::Result<T, RtailError>;

impl RtailError {
    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an Unexpected error from an io::Error with additional context
    pub fn unexpected(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Unexpected {
            message: message.into(),
            source,
        }
    }

    /// Create a Config error with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify an io::Error raised while accessing `path`.
    ///
    /// NotFound and PermissionDenied keep their own variants so callers can
    /// tell them apart from device or decoding failures.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            _ => Self::Unexpected {
                message: format!("I/O error on {}", path.display()),
                source: err,
            },
        }
    }

    /// Whether this error came from the cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// Automatic conversion for reads where no path is in scope
impl From<std::io::Error> for RtailError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected {
            message: "IO operation failed".to_string(),
            source: err,
        }
    }
}
