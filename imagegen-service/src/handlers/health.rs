use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Health check endpoint for Docker/K8s liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "imagegen-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint for K8s readiness probes.
///
/// Ready only when both providers pass their health checks.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let checks = tokio::try_join!(
        state.enricher.health_check(),
        state.image_provider.health_check()
    );

    match checks {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
