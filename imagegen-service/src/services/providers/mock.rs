//! Mock provider implementations for testing.

use super::{
    FinishReason, GeneratedImage, GenerationParams, ImageProvider, ProviderError, TextProvider,
    TextResponse,
};
use crate::models::AspectRatio;
use async_trait::async_trait;

/// Mock text provider returning a canned payload or a canned failure.
pub struct MockTextProvider {
    result: Result<String, String>,
}

impl MockTextProvider {
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            result: Ok(payload.into()),
        }
    }

    pub fn failing_with(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        _system: &str,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<TextResponse, ProviderError> {
        match &self.result {
            Ok(payload) => Ok(TextResponse {
                text: Some(payload.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: payload.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.result {
            Ok(_) => Ok(()),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}

/// Mock image provider returning canned images or a canned failure.
pub struct MockImageProvider {
    result: Result<Vec<GeneratedImage>, String>,
}

impl MockImageProvider {
    pub fn with_images(images: Vec<GeneratedImage>) -> Self {
        Self { result: Ok(images) }
    }

    pub fn failing_with(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _n: u32,
        _ratio: AspectRatio,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        match &self.result {
            Ok(images) => Ok(images.clone()),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.result {
            Ok(_) => Ok(()),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
