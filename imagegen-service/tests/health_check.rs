//! Integration tests for the operational endpoints.

use imagegen_service::config::ImagegenConfig;
use imagegen_service::services::providers::mock::{MockImageProvider, MockTextProvider};
use imagegen_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("OPENAI_API_KEY", "test-api-key");

    let config = ImagegenConfig::load().expect("Failed to load config");
    let app = Application::build_with_providers(
        config,
        Arc::new(MockTextProvider::with_payload("{}")),
        Arc::new(MockImageProvider::with_images(vec![])),
    )
    .await
    .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "imagegen-service");
}

#[tokio::test]
async fn readiness_check_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/ready", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}
