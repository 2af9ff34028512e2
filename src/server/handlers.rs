use super::{
    prompt::DEFAULT_PROMPT,
    types::{ErrorResponse, VisionRequest},
};
use crate::{
    Error,
    answer::{NormalizedAnswer, normalize},
    config::{Config, UnrecognizedPolicy},
    llm::VisionClient,
};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn VisionClient>,
    pub default_prompt: Arc<str>,
    pub policy: UnrecognizedPolicy,
}

impl AppState {
    pub fn new(client: Arc<dyn VisionClient>, config: &Config) -> Self {
        let default_prompt = config
            .upstream
            .prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PROMPT);

        Self {
            client,
            default_prompt: Arc::from(default_prompt),
            policy: config.normalizer.unrecognized,
        }
    }
}

pub async fn health() -> &'static str {
    "OK: vision proxy running"
}

pub async fn vision(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<NormalizedAnswer>, ApiError> {
    let request_id = Uuid::new_v4();

    let body = body.map_err(|rejection| {
        warn!(%request_id, "Rejected vision request body: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse::new("invalid_request").with_message(rejection.body_text())),
        )
    })?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let request = VisionRequest::decode(content_type, &body).map_err(|e| {
        warn!(%request_id, "Malformed vision request body: {}", e);
        let status = if e.is_data() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_REQUEST
        };
        (
            status,
            Json(
                ErrorResponse::new("invalid_request")
                    .with_message(format!("Failed to parse the request body as JSON: {}", e)),
            ),
        )
    })?;

    let Some(image) = request.image() else {
        warn!(%request_id, "Vision request without image_base64");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("image_base64 is required")),
        ));
    };

    let (prompt, prompt_source) = match request.prompt() {
        Some(prompt) => (prompt, "caller"),
        None => (state.default_prompt.as_ref(), "default"),
    };

    info!(
        %request_id,
        prompt_source,
        image_len = image.len(),
        "Received vision request"
    );

    match state.client.submit(image, prompt).await {
        Ok(text) => {
            let result = normalize(&text, state.policy);
            info!(
                %request_id,
                answer = %result.answer(),
                vib_count = result.vib_count(),
                "Answered vision request"
            );
            Ok(Json(result))
        }
        Err(e) => {
            error!(%request_id, "Vision request failed: {}", e);
            Err(error_response(e))
        }
    }
}

/// Maps a relay error onto the status code and body the client sees.
pub fn error_response(err: Error) -> ApiError {
    match err {
        Error::Upstream { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(ErrorResponse::new("openai_error").with_details(body)),
        ),
        Error::UnexpectedResponse { body } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("unexpected_response").with_details(body)),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("server_error").with_message(other.to_string())),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_error_keeps_status_and_body() {
        let (status, Json(body)) =
            error_response(Error::upstream(429, json!({"error": "rate_limited"})));

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body.error, "openai_error");
        assert_eq!(body.details, Some(json!({"error": "rate_limited"})));
        assert!(body.message.is_none());
    }

    #[test]
    fn test_unexpected_response_is_500() {
        let (status, Json(body)) = error_response(Error::unexpected_response(json!({"id": "x"})));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "unexpected_response");
        assert_eq!(body.details, Some(json!({"id": "x"})));
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        let (status, Json(body)) = error_response(Error::internal("socket closed"));

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "server_error");
        assert_eq!(body.message.as_deref(), Some("Internal error: socket closed"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_state_prefers_configured_prompt() {
        struct NoopClient;

        #[async_trait::async_trait]
        impl VisionClient for NoopClient {
            async fn submit(&self, _: &str, _: &str) -> crate::Result<String> {
                Ok(String::new())
            }
        }

        let mut config = Config::default();
        let state = AppState::new(Arc::new(NoopClient), &config);
        assert_eq!(state.default_prompt.as_ref(), DEFAULT_PROMPT);

        config.upstream.prompt = Some("Answer with a letter.".to_string());
        let state = AppState::new(Arc::new(NoopClient), &config);
        assert_eq!(state.default_prompt.as_ref(), "Answer with a letter.");
    }
}
