pub mod providers;
pub mod types;
pub mod utils;

pub use providers::gemini;
pub use types::{GenerateFn, LLMClient, LLMMessage, LLMMessageType, LLMUserType};
