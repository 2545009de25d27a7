use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Value, json};

use crate::types::{LLMClient, LLMMessage, LLMMessageType, LLMUserType};

use super::models::{GeminiResponse, GenerateOptions, GenerationConfig};

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({ "text": text }),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => json!({
                "inlineData": {
                    "mimeType": mime_type,
                    "data": data_b64
                }
            }),
        })
        .collect()
}

pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            let parts = convert_body_parts_gemini(m.content);
            json!({
                "role": role_to_str(m.role),
                "parts": parts
            })
        })
        .collect()
}

fn role_to_str(role: LLMUserType) -> &'static str {
    match role {
        LLMUserType::Human => "user",
        LLMUserType::AI => "model",
        LLMUserType::System => "system",
    }
}

/// Builds the JSON body of a `generateContent` call.
pub fn build_generate_body(messages: Vec<LLMMessage>, options: &GenerateOptions) -> Value {
    let generation_config = GenerationConfig {
        response_modalities: options.response_modalities.clone(),
    };
    json!({
        "contents": convert_messages_to_gemini_contents(messages),
        "generationConfig": generation_config,
        "safetySettings": options.safety_settings,
    })
}

pub fn generate_url(api_client: &LLMClient) -> String {
    let endpoint = api_client.endpoint().trim_end_matches('/');
    let model = api_client.default_model();
    let model = model.strip_prefix("models/").unwrap_or(model);
    format!("{}/{}:generateContent", endpoint, model)
}

/// Posts one `generateContent` body. Non-2xx statuses and undecodable bodies are errors.
pub async fn send_generate_request(api_client: &LLMClient, body: Value) -> Result<GeminiResponse> {
    let url = generate_url(api_client);
    tracing::debug!(url = %url, model = api_client.default_model(), "Sending generateContent request");

    let client = Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .context("HTTP request failed")?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Reading response body failed")?;

    if !status.is_success() {
        tracing::warn!(status = %status, "Gemini returned a non-success status");
        return Err(anyhow::anyhow!(
            "Gemini generateContent failed: status {} body {}",
            status,
            response_text
        ));
    }

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    tracing::debug!(
        candidates = response.candidates.len(),
        response_id = response.response_id.as_deref().unwrap_or("-"),
        "Received generateContent response"
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_strips_models_prefix_and_slash() {
        let client = LLMClient::new(
            "key",
            "https://example.test/v1beta/models/",
            "models/gemini-2.5-flash-image-preview",
        );
        assert_eq!(
            generate_url(&client),
            "https://example.test/v1beta/models/gemini-2.5-flash-image-preview:generateContent"
        );
    }

    #[test]
    fn test_build_generate_body_shape() {
        let messages = vec![LLMMessage::new(
            "user",
            vec![
                LLMMessageType::image_b64("AAAA", "image/jpeg"),
                LLMMessageType::text("make it snow"),
            ],
        )];
        let body = build_generate_body(messages, &GenerateOptions::image_generation());

        assert_eq!(body["contents"][0]["role"], "user");
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "AAAA");
        assert_eq!(parts[1]["text"], "make it snow");

        assert_eq!(
            body["generationConfig"]["responseModalities"],
            json!(["IMAGE", "TEXT"])
        );
        let safety = body["safetySettings"].as_array().unwrap();
        let categories: Vec<&str> = safety
            .iter()
            .map(|setting| setting["category"].as_str().unwrap())
            .collect();
        assert_eq!(
            categories,
            vec![
                "HARM_CATEGORY_HARASSMENT",
                "HARM_CATEGORY_HATE_SPEECH",
                "HARM_CATEGORY_SEXUALLY_EXPLICIT",
                "HARM_CATEGORY_DANGEROUS_CONTENT",
            ]
        );
        assert!(safety.iter().all(|setting| setting["threshold"] == "BLOCK_NONE"));
    }
}
