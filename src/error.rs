//! Error types and handling for BatchResize

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for BatchResize operations
pub type Result<T> = std::result::Result<T, BatchError>;

/// Main error type for BatchResize operations
#[derive(Debug, Error)]
pub enum BatchError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (bad format, quality, dimensions, worker count)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input directory missing or not a directory
    #[error("Input directory does not exist: {path}")]
    InputDirNotFound { path: PathBuf },

    /// A single file could not be decoded (corrupt or unsupported)
    #[error("Failed to decode {file}: {message}")]
    Decode { message: String, file: PathBuf },

    /// A single output file could not be encoded or written
    #[error("Failed to encode {file}: {message}")]
    Encode { message: String, file: PathBuf },

    /// Worker pool errors (closed semaphore, panicked task)
    #[error("Worker pool error: {message}")]
    Pool { message: String },
}

impl BatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new decode error for a specific file
    pub fn decode<S: Into<String>>(message: S, file: PathBuf) -> Self {
        Self::Decode {
            message: message.into(),
            file,
        }
    }

    /// Create a new encode error for a specific file
    pub fn encode<S: Into<String>>(message: S, file: PathBuf) -> Self {
        Self::Encode {
            message: message.into(),
            file,
        }
    }

    /// Create a new worker pool error
    pub fn pool<S: Into<String>>(message: S) -> Self {
        Self::Pool {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (processing can continue)
    ///
    /// Recoverable errors affect a single file; the rest of the batch keeps
    /// going. Non-recoverable errors stop the run before any work is
    /// dispatched.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) | Self::Decode { .. } | Self::Encode { .. } => true,

            Self::Config { .. } | Self::InputDirNotFound { .. } | Self::Pool { .. } => false,
        }
    }

    /// Get the associated file path if available
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Decode { file, .. } | Self::Encode { file, .. } => Some(file),
            Self::InputDirNotFound { path } => Some(path),
            _ => None,
        }
    }
}
