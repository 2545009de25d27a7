use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::providers::gemini::models::GeminiResponse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE { data_b64: String, mime_type: String },
}

impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }

    pub fn image_b64(data_b64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encodes raw image bytes into an inline image part.
    pub fn image_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: crate::utils::encode_byte_to_base64(bytes),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LLMUserType {
    Human,
    AI,
    System,
}

impl LLMUserType {
    pub fn from_str(role_str: &str) -> Option<Self> {
        match role_str.trim().to_lowercase().as_str() {
            "user" | "human" => Some(LLMUserType::Human),
            "model" | "ai" | "assistant" => Some(LLMUserType::AI),
            "system" => Some(LLMUserType::System),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMMessage {
    pub role: LLMUserType,
    pub content: Vec<LLMMessageType>,
}

impl LLMMessage {
    pub fn new(role: &str, content: Vec<LLMMessageType>) -> Self {
        Self {
            role: LLMUserType::from_str(role).unwrap_or(LLMUserType::Human),
            content,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Sends one `generateContent` body and resolves to the decoded response.
///
/// Production code gets one from [`crate::gemini::generate`]; tests plug in stubs.
pub type GenerateFn = Arc<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = anyhow::Result<GeminiResponse>> + Send + 'static>>
        + Send
        + Sync,
>;
