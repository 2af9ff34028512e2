use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use vision_relay::{
    config::{Config, UpstreamConfig},
    llm::VisionClient,
    server::{self, handlers::AppState},
};

pub const TEST_IMAGE: &str = "/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDBQNDAsLDBkSEw8U";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        upstream: UpstreamConfig {
            api_key: "test-api-key".to_string(),
            ..UpstreamConfig::default()
        },
        ..Config::default()
    }
}

/// Build the full router around an injected client
pub fn create_test_app(client: Arc<dyn VisionClient>, config: &Config) -> Router {
    let state = AppState::new(client, config);
    server::router(state, config.server.body_limit_bytes)
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Write a config YAML file into a fresh temporary directory
pub async fn create_test_config_file(content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await.unwrap();
    (dir, config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  body_limit_bytes: 2048
  logs:
    level: "debug"
upstream:
  base_url: "http://localhost:9999/v1"
  api_key: "file-key"
  model: "gpt-4.1"
  temperature: 0.25
  prompt: "Reply with one letter."
normalizer:
  unrecognized: retake
"#;
