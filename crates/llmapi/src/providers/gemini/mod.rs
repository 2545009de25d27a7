mod api;
pub mod models;
pub use api::{
    build_generate_body, convert_body_parts_gemini, convert_messages_to_gemini_contents,
    generate_url, send_generate_request,
};

use crate::types::{GenerateFn, LLMClient};
use models::GeminiResponse;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Wraps [`send_generate_request`] as a shareable transport bound to `client`.
pub fn generate(client: LLMClient) -> GenerateFn {
    Arc::new(move |body: Value| {
        let client = client.clone();
        let request: Pin<Box<dyn Future<Output = anyhow::Result<GeminiResponse>> + Send>> =
            Box::pin(async move { send_generate_request(&client, body).await });
        request
    })
}
