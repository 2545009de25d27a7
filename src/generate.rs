use std::future::Future;

use llmapi::gemini::models::{GeminiResponse, GenerateOptions};
use llmapi::gemini::{build_generate_body, generate};
use llmapi::utils::decode_base64;
use llmapi::{GenerateFn, LLMClient, LLMMessage, LLMMessageType};
use tokio::task::JoinSet;

use crate::config::ClientConfig;
use crate::constants::{DEFAULT_IMAGE_MIME, FINAL_IMAGE_DIRECTIVE};
use crate::error::GenerationError;
use crate::models::{GeneratedImage, GenerationRequest, InputImage, StyleParameters};

pub type GenerationResult = Result<GeneratedImage, GenerationError>;

/// Sends one image-to-image request per call and classifies the answer.
#[derive(Clone)]
pub struct GenerationClient {
    send: GenerateFn,
    model: String,
}

impl GenerationClient {
    pub fn new(config: &ClientConfig) -> Self {
        let client = LLMClient::new(
            config.api_key.clone(),
            config.endpoint.clone(),
            config.model.clone(),
        );
        Self {
            send: generate(client),
            model: config.model.clone(),
        }
    }

    /// Uses `send` instead of the HTTP transport.
    pub fn with_transport(send: GenerateFn) -> Self {
        Self {
            send,
            model: "custom".to_string(),
        }
    }

    pub async fn generate(&self, request: GenerationRequest) -> GenerationResult {
        validate_request(&request)?;

        let GenerationRequest {
            prompt,
            images,
            styles,
        } = request;
        let image_count = images.len();

        let mut content = encode_images(images).await?;
        content.push(LLMMessageType::text(build_instruction(&prompt, &styles)));

        let body = build_generate_body(
            vec![LLMMessage::new("user", content)],
            &GenerateOptions::image_generation(),
        );

        tracing::info!(
            model = %self.model,
            images = image_count,
            camera_style = styles.camera().unwrap_or("-"),
            lighting_style = styles.lighting().unwrap_or("-"),
            "Requesting image generation"
        );

        let response = (self.send)(body).await.map_err(|err| {
            let message = format!("{:#}", err);
            tracing::warn!(error = %message, "Image generation request failed");
            GenerationError::Service(message)
        })?;

        let result = classify_response(&response);
        match &result {
            Ok(image) => tracing::info!(
                mime_type = %image.mime_type,
                bytes = image.bytes.len(),
                "Image generated"
            ),
            Err(err) => tracing::warn!(error = %err, "Generation returned no image"),
        }
        result
    }
}

/// Rejects requests that must never reach the network.
pub fn validate_request(request: &GenerationRequest) -> Result<(), GenerationError> {
    if request.prompt.trim().is_empty() {
        return Err(GenerationError::Validation("prompt is empty".into()));
    }
    if request.images.is_empty() {
        return Err(GenerationError::Validation(
            "at least one image is required".into(),
        ));
    }
    if let Some(index) = request.images.iter().position(|image| image.data.is_empty()) {
        return Err(GenerationError::Validation(format!(
            "image {} has no data",
            index + 1
        )));
    }
    Ok(())
}

/// Final instruction text: the user's theme, optional style clauses, then the
/// "image only" directive.
pub fn build_instruction(prompt: &str, styles: &StyleParameters) -> String {
    let mut style_prompt = String::new();
    if let Some(camera) = styles.camera() {
        style_prompt.push_str(&format!(", with a {camera} camera style"));
    }
    if let Some(lighting) = styles.lighting() {
        style_prompt.push_str(&format!(", using {lighting} lighting"));
    }

    format!(
        "Re-imagine the provided image(s) with this theme: \"{}\"{}. {}",
        prompt.trim(),
        style_prompt,
        FINAL_IMAGE_DIRECTIVE
    )
}

/// Base64-encodes every image on its own blocking task, keeping input order.
pub async fn encode_images(images: Vec<InputImage>) -> Result<Vec<LLMMessageType>, GenerationError> {
    fan_out_ordered(images, |image| async move {
        tokio::task::spawn_blocking(move || {
            LLMMessageType::image_bytes(&image.data, image.mime_type)
        })
        .await
        .map_err(|err| GenerationError::Encoding(err.to_string()))
    })
    .await
}

/// Runs `task` for every item concurrently and returns the outputs in input
/// order, whatever order they complete in.
pub async fn fan_out_ordered<I, T, F, Fut>(items: Vec<I>, task: F) -> Result<Vec<T>, GenerationError>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T, GenerationError>> + Send + 'static,
{
    let total = items.len();
    let mut tasks = JoinSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let pending = task(item);
        tasks.spawn(async move { (index, pending.await) });
    }

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, output) = joined.map_err(|err| GenerationError::Encoding(err.to_string()))?;
        slots[index] = Some(output?);
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Maps a decoded service response onto the result taxonomy.
pub fn classify_response(response: &GeminiResponse) -> GenerationResult {
    if let Some(inline_data) = response.first_inline_image() {
        let bytes = decode_base64(&inline_data.data).map_err(|err| {
            GenerationError::Service(format!("Malformed image payload: {:#}", err))
        })?;
        let mime_type = match inline_data.mime_type.trim() {
            "" => DEFAULT_IMAGE_MIME.to_string(),
            mime_type => mime_type.to_string(),
        };
        return Ok(GeneratedImage { mime_type, bytes });
    }

    let text = response.text();
    if let Some(reason) = response.block_reason() {
        return Err(GenerationError::ContentBlocked {
            reason: reason.to_string(),
            text,
        });
    }

    Err(GenerationError::GenerationFailed { text })
}
