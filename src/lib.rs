pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs_utils;
pub mod generate;
pub mod messages;
pub mod models;
pub mod session;
pub mod watermark;

pub use config::ClientConfig;
pub use error::{ConfigError, GenerationError, StoryError};
pub use generate::{GenerationClient, GenerationResult};
pub use messages::{user_message, Locale};
pub use models::{GeneratedImage, GenerationRequest, InputImage, Platform, StyleParameters};
pub use session::{run_pipeline, GenerationState, StorySession, SubmitOutcome};
pub use watermark::{apply_watermark, WatermarkError};
