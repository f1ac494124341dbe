//! Prompt enrichment via structured extraction.

use crate::models::PromptFields;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;

/// System instruction for the extraction call.
const EXTRACTION_SYSTEM_PROMPT: &str = "Extracting structured data from your input...";

/// Runs the structured-extraction call and enforces the field contract on
/// the provider's reply.
#[derive(Clone)]
pub struct PromptEnricher {
    provider: Arc<dyn TextProvider>,
}

impl PromptEnricher {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Extract structured prompt fields from raw user text.
    ///
    /// A reply that does not deserialize into [`PromptFields`] is a
    /// [`ProviderError::SchemaViolation`], not a panic or a silent default.
    pub async fn enrich(&self, input: &str) -> Result<PromptFields, ProviderError> {
        let params = GenerationParams {
            output_schema: Some(PromptFields::output_schema()),
            ..Default::default()
        };

        let response = self
            .provider
            .generate(EXTRACTION_SYSTEM_PROMPT, input, &params)
            .await?;

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Structured extraction completed"
        );

        let text = response.text.ok_or_else(|| {
            ProviderError::SchemaViolation(
                "Provider returned no content for structured extraction".to_string(),
            )
        })?;

        let fields: PromptFields = serde_json::from_str(&text).map_err(|e| {
            ProviderError::SchemaViolation(format!(
                "Provider output does not match the prompt-fields contract: {}",
                e
            ))
        })?;

        tracing::debug!(
            subject = fields.subject.len(),
            objects = fields.objects.len(),
            negative = fields.negative.len(),
            "Extracted structured prompt fields"
        );

        Ok(fields)
    }

    /// Health check, delegated to the underlying provider.
    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }
}
