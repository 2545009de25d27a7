//! Watermark error types.

use thiserror::Error;

/// Errors that can occur while compositing the logo.
///
/// All of them end the current compositing attempt; nothing is retried.
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// The base image or the logo could not be decoded
    #[error("Failed to decode {source_name}: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    /// No drawing surface is available for these dimensions
    #[error("Could not allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },

    /// The composited image could not be re-encoded
    #[error("Failed to encode watermarked image: {0}")]
    Encode(String),

    /// A decode or draw task was cancelled or panicked
    #[error("Watermark task failed: {0}")]
    Task(String),
}

impl WatermarkError {
    pub(crate) fn decode(source_name: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            source_name,
            message: err.to_string(),
        }
    }
}
