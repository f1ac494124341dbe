//! Integration tests for the /generate endpoint.
//!
//! These tests spawn the service on a random port with mock providers and
//! drive it over HTTP.

use imagegen_service::config::ImagegenConfig;
use imagegen_service::services::providers::mock::{MockImageProvider, MockTextProvider};
use imagegen_service::services::providers::{GeneratedImage, ImageProvider, TextProvider};
use imagegen_service::startup::Application;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const CAT_FIELDS: &str =
    r#"{"subject":["cat"],"objects":["hat"],"mood":[],"style":[],"negative":[]}"#;

fn cat_image() -> GeneratedImage {
    GeneratedImage {
        url: "http://x/1.png".to_string(),
        revised_prompt: "a cat wearing a hat".to_string(),
    }
}

/// Spawn the application on a random port and return the port number.
async fn spawn_app(
    text_provider: Arc<dyn TextProvider>,
    image_provider: Arc<dyn ImageProvider>,
) -> u16 {
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("OPENAI_API_KEY", "test-api-key");

    let config = ImagegenConfig::load().expect("Failed to load config");
    let app = Application::build_with_providers(config, text_provider, image_provider)
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

async fn post_generate(port: u16, body: &Value) -> reqwest::Response {
    Client::new()
        .post(format!("http://localhost:{}/generate", port))
        .json(body)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn generate_returns_provider_urls() {
    let port = spawn_app(
        Arc::new(MockTextProvider::with_payload(CAT_FIELDS)),
        Arc::new(MockImageProvider::with_images(vec![cat_image()])),
    )
    .await;

    let response = post_generate(
        port,
        &json!({"prompt": "a cat in a hat", "n": 1, "ratio": "1:1"}),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({"urls": [["http://x/1.png", "a cat wearing a hat"]]})
    );
}

#[tokio::test]
async fn invalid_ratio_fails_before_any_provider_call() {
    // Both stubs fail loudly: reaching either provider would surface as 502
    // instead of the expected 400.
    let port = spawn_app(
        Arc::new(MockTextProvider::failing_with("text provider reached")),
        Arc::new(MockImageProvider::failing_with("image provider reached")),
    )
    .await;

    let response = post_generate(port, &json!({"prompt": "a cat", "ratio": "9:9"})).await;

    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error field missing");
    assert!(error.contains("Invalid ratio"), "unexpected error: {error}");
    assert!(error.contains("9:9"), "unexpected error: {error}");
}

#[tokio::test]
async fn image_provider_failure_maps_to_bad_gateway() {
    let port = spawn_app(
        Arc::new(MockTextProvider::with_payload(CAT_FIELDS)),
        Arc::new(MockImageProvider::failing_with("boom")),
    )
    .await;

    let response = post_generate(port, &json!({"prompt": "a cat in a hat"})).await;

    assert_eq!(response.status().as_u16(), 502);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "boom");
}

#[tokio::test]
async fn malformed_extraction_payload_maps_to_bad_gateway() {
    let port = spawn_app(
        Arc::new(MockTextProvider::with_payload("not json at all")),
        Arc::new(MockImageProvider::with_images(vec![cat_image()])),
    )
    .await;

    let response = post_generate(port, &json!({"prompt": "a cat in a hat"})).await;

    assert_eq!(response.status().as_u16(), 502);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error field missing");
    assert!(error.contains("contract"), "unexpected error: {error}");
}

#[tokio::test]
async fn omitted_fields_default_to_one_square_image() {
    let port = spawn_app(
        Arc::new(MockTextProvider::with_payload(CAT_FIELDS)),
        Arc::new(MockImageProvider::with_images(vec![cat_image()])),
    )
    .await;

    let implicit = post_generate(port, &json!({"prompt": "x"})).await;
    assert_eq!(implicit.status().as_u16(), 200);
    let implicit_body: Value = implicit.json().await.expect("Failed to parse JSON");

    let explicit = post_generate(port, &json!({"prompt": "x", "n": 1, "ratio": "1:1"})).await;
    assert_eq!(explicit.status().as_u16(), 200);
    let explicit_body: Value = explicit.json().await.expect("Failed to parse JSON");

    assert_eq!(implicit_body, explicit_body);
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let port = spawn_app(
        Arc::new(MockTextProvider::failing_with("text provider reached")),
        Arc::new(MockImageProvider::failing_with("image provider reached")),
    )
    .await;

    let response = post_generate(port, &json!({"prompt": ""})).await;

    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Validation error");
}
