//! Application startup and lifecycle management.

use crate::config::ImagegenConfig;
use crate::handlers;
use crate::services::providers::openai::{OpenAiConfig, OpenAiImageProvider, OpenAiTextProvider};
use crate::services::providers::{ImageProvider, TextProvider};
use crate::services::PromptEnricher;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub enricher: PromptEnricher,
    pub image_provider: Arc<dyn ImageProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with OpenAI-backed providers.
    pub async fn build(config: ImagegenConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(OpenAiTextProvider::new(OpenAiConfig {
                api_key: config.openai.api_key.clone(),
                api_base_url: config.openai.api_base_url.clone(),
                model: config.models.text_model.clone(),
            }));

        let image_provider: Arc<dyn ImageProvider> =
            Arc::new(OpenAiImageProvider::new(OpenAiConfig {
                api_key: config.openai.api_key.clone(),
                api_base_url: config.openai.api_base_url.clone(),
                model: config.models.image_model.clone(),
            }));

        tracing::info!(
            text_model = %config.models.text_model,
            image_model = %config.models.image_model,
            "Initialized OpenAI providers"
        );

        Self::build_with_providers(config, text_provider, image_provider).await
    }

    /// Build the application with explicit providers (used by tests).
    pub async fn build_with_providers(
        config: ImagegenConfig,
        text_provider: Arc<dyn TextProvider>,
        image_provider: Arc<dyn ImageProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            enricher: PromptEnricher::new(text_provider),
            image_provider,
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: app_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Build the service router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate::generate))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
