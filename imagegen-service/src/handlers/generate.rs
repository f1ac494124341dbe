use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{GenerateImageRequest, GenerateImageResponse};
use crate::models::{compose_final_prompt, AspectRatio, ParseRatioError};
use crate::startup::AppState;

/// Generate images for a user prompt.
///
/// Pipeline: ratio validation, structured prompt extraction, prompt
/// composition, image generation. The ratio check runs before any provider
/// call.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateImageRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let request_id = uuid::Uuid::new_v4().to_string();

    let ratio: AspectRatio = req
        .ratio
        .parse()
        .map_err(|e: ParseRatioError| AppError::BadRequest(anyhow::anyhow!(e)))?;

    tracing::info!(
        request_id = %request_id,
        prompt_len = req.prompt.len(),
        n = req.n,
        ratio = %ratio,
        "Processing image generation request"
    );

    let fields = state.enricher.enrich(&req.prompt).await.map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Prompt enrichment failed");
        e
    })?;

    let final_prompt = compose_final_prompt(&fields);

    let images = state
        .image_provider
        .generate(&final_prompt, req.n, ratio)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Image generation failed");
            e
        })?;

    tracing::info!(
        request_id = %request_id,
        count = images.len(),
        "Image generation request completed"
    );

    let urls = images
        .into_iter()
        .map(|image| (image.url, image.revised_prompt))
        .collect();

    Ok((StatusCode::OK, Json(GenerateImageResponse { urls })))
}
