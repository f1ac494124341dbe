//! OpenAI provider implementations.
//!
//! Structured prompt extraction goes through the Chat Completions API with a
//! JSON-schema response format; image synthesis goes through the Images API.

use super::{
    FinishReason, GeneratedImage, GenerationParams, ImageProvider, ProviderError, TextProvider,
    TextResponse,
};
use crate::models::AspectRatio;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Rendering quality submitted with every image request. Not configurable.
const IMAGE_QUALITY: &str = "hd";

/// Rendering style submitted with every image request. Not configurable.
const IMAGE_STYLE: &str = "vivid";

/// Schema name advertised to the structured-output API.
const SCHEMA_NAME: &str = "prompt_fields";

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
}

/// OpenAI text provider backed by the Chat Completions API.
pub struct OpenAiTextProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiTextProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl TextProvider for OpenAiTextProvider {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<TextResponse, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            response_format: params.output_schema.as_ref().map(build_response_format),
        };

        let url = format!("{}/chat/completions", self.config.api_base_url);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            structured = request.response_format.is_some(),
            "Sending request to Chat Completions API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError("Response contained no choices".to_string()))?;

        let finish_reason = parse_finish_reason(choice.finish_reason.as_deref());
        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        let usage = api_response.usage.unwrap_or_default();

        Ok(TextResponse {
            text: choice.message.content,
            input_tokens: usage.prompt_tokens.unwrap_or(0),
            output_tokens: usage.completion_tokens.unwrap_or(0),
            finish_reason,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "OpenAI API key not configured".to_string(),
            ));
        }

        // Listing models verifies both reachability and the credential.
        let url = format!("{}/models", self.config.api_base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

/// OpenAI image provider backed by the Images API.
pub struct OpenAiImageProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiImageProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    async fn generate(
        &self,
        prompt: &str,
        n: u32,
        ratio: AspectRatio,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        let request = ImageGenerationRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            n,
            size: ratio.size().to_string(),
            quality: IMAGE_QUALITY.to_string(),
            style: IMAGE_STYLE.to_string(),
        };

        let url = format!("{}/images/generations", self.config.api_base_url);

        tracing::debug!(
            model = %self.config.model,
            n,
            size = %request.size,
            "Sending request to Images API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        if api_response.data.len() != n as usize {
            return Err(ProviderError::ApiError(format!(
                "Provider returned {} images, expected {}",
                api_response.data.len(),
                n
            )));
        }

        Ok(api_response
            .data
            .into_iter()
            .map(|image| GeneratedImage {
                url: image.url,
                revised_prompt: image.revised_prompt,
            })
            .collect())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            Err(ProviderError::NotConfigured(
                "OpenAI API key not configured".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn parse_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Complete,
    }
}

fn build_response_format(schema: &serde_json::Value) -> ResponseFormat {
    ResponseFormat {
        kind: "json_schema".to_string(),
        json_schema: JsonSchemaFormat {
            name: SCHEMA_NAME.to_string(),
            strict: true,
            schema: schema.clone(),
        },
    }
}

// ============================================================================
// OpenAI API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TokenUsage {
    prompt_tokens: Option<i32>,
    completion_tokens: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
    quality: String,
    style: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
    revised_prompt: String,
}
