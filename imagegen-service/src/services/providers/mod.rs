//! AI provider abstractions and implementations.
//!
//! Trait-based seam over the external text and image providers, with mock
//! implementations for tests.

pub mod mock;
pub mod openai;

use crate::models::AspectRatio;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotConfigured(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            ProviderError::ApiError(msg) => AppError::BadGateway(msg),
            ProviderError::InvalidRequest(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ProviderError::RateLimited => {
                AppError::TooManyRequests("Rate limited by AI provider".to_string(), None)
            }
            ProviderError::ContentFiltered => AppError::BadRequest(anyhow::anyhow!(
                "Content was filtered by AI provider safety settings"
            )),
            ProviderError::NetworkError(msg) => AppError::ServiceUnavailable(msg),
            ProviderError::SchemaViolation(msg) => AppError::BadGateway(msg),
        }
    }
}

/// Result of a text provider call.
pub struct TextResponse {
    /// Generated text, when the provider produced any.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why text generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Generation parameters for text requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,

    /// JSON schema for structured output.
    pub output_schema: Option<serde_json::Value>,
}

/// One generated image as returned by the image provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Where the rendered image can be fetched.
    pub url: String,

    /// The provider's rewritten version of the submitted prompt.
    pub revised_prompt: String,
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a text response for a system instruction and user prompt.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<TextResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Trait for image generation providers.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate `n` images for the prompt at the given aspect ratio.
    ///
    /// Returns exactly `n` images in provider order, or fails as a whole;
    /// there are no partial results.
    async fn generate(
        &self,
        prompt: &str,
        n: u32,
        ratio: AspectRatio,
    ) -> Result<Vec<GeneratedImage>, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
