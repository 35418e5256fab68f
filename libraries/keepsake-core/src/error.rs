/// Core error types for Keepsake
use thiserror::Error;

/// Result type alias using `KeepsakeError`
pub type Result<T> = std::result::Result<T, KeepsakeError>;

/// Core error type for Keepsake
#[derive(Error, Debug)]
pub enum KeepsakeError {
    /// A path that must be a directory is something else
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Directory walk failed
    #[error("Directory scan failed: {0}")]
    Scan(#[from] walkdir::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl KeepsakeError {
    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }
}
