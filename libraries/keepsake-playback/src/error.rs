//! Error types for slideshow playback

use thiserror::Error;

/// Playback errors
///
/// These travel through the injected platform traits. The controller turns
/// every one of them into state (a `None` image, a paused indicator) instead
/// of passing it on.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Image fetch failed
    #[error("Failed to load image {url}: {reason}")]
    ImageLoad { url: String, reason: String },

    /// Image decode failed
    #[error("Failed to decode image {0}")]
    Decode(String),

    /// Platform refused to start audio playback
    #[error("Audio playback blocked: {0}")]
    AutoplayBlocked(String),
}

impl PlaybackError {
    /// Create an image load error
    pub fn image_load(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageLoad {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
