//! Error taxonomy for the generate-then-watermark pipeline.

use thiserror::Error;

use crate::watermark::WatermarkError;

/// Ways a generation call can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Empty prompt or missing images; nothing was sent.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Transport failure, non-2xx status or a malformed response.
    #[error("Service error: {0}")]
    Service(String),

    /// The service refused on content-policy grounds.
    #[error("Request blocked by content policy ({reason})")]
    ContentBlocked { reason: String, text: Option<String> },

    /// The service answered without an image and without a block reason.
    #[error("No image was generated{}", detail_suffix(.text))]
    GenerationFailed { text: Option<String> },

    /// A per-image encoding task did not finish.
    #[error("Failed to encode input image: {0}")]
    Encoding(String),
}

fn detail_suffix(text: &Option<String>) -> String {
    match text {
        Some(text) => format!(": {}", text),
        None => String::new(),
    }
}

/// Any failure of the full generate-then-watermark operation.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Watermark(#[from] WatermarkError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing API key: set one of {0}")]
    MissingApiKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GenerationError::Validation("prompt is empty".to_string());
        assert_eq!(err.to_string(), "Invalid request: prompt is empty");

        let err = GenerationError::ContentBlocked {
            reason: "PROHIBITED_CONTENT".to_string(),
            text: None,
        };
        assert_eq!(
            err.to_string(),
            "Request blocked by content policy (PROHIBITED_CONTENT)"
        );

        let err = GenerationError::GenerationFailed {
            text: Some("I can only describe images".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "No image was generated: I can only describe images"
        );

        let err = GenerationError::GenerationFailed { text: None };
        assert_eq!(err.to_string(), "No image was generated");
    }

    #[test]
    fn test_story_error_is_transparent() {
        let err: StoryError = GenerationError::Service("timeout".to_string()).into();
        assert_eq!(err.to_string(), "Service error: timeout");
    }
}
