use super::types::ResponsesRequest;
use crate::{Error, Result, config::UpstreamConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

/// The one seam between the relay and the vision API. Implementations own
/// the upstream wire schema; callers only ever see the answer text.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn submit(&self, image_base64: &str, prompt: &str) -> Result<String>;
}

pub struct OpenAiVisionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiVisionClient {
    pub fn new(config: UpstreamConfig) -> Self {
        let endpoint = format!("{}/responses", config.base_url.trim_end_matches('/'));

        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key: config.api_key,
            model: config.model,
            temperature: config.temperature,
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self, image_base64: &str, prompt: &str) -> ResponsesRequest {
        ResponsesRequest::vision(&self.model, self.temperature, image_base64, prompt)
    }
}

#[async_trait]
impl VisionClient for OpenAiVisionClient {
    async fn submit(&self, image_base64: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(image_base64, prompt);

        debug!(
            "Submitting {} byte image to {} with model {}",
            image_base64.len(),
            self.endpoint,
            self.model
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            let body = parsed.unwrap_or(Value::String(text));
            error!("Upstream error ({}): {}", status.as_u16(), body);
            return Err(Error::upstream(status.as_u16(), body));
        }

        let body = match parsed {
            Ok(body) => body,
            Err(e) => {
                error!("Upstream returned a non-JSON body: {}", e);
                return Err(Error::unexpected_response(Value::String(text)));
            }
        };

        match extract_text(&body) {
            Some(answer) => {
                debug!("Upstream answered with {} chars", answer.len());
                Ok(answer.to_string())
            }
            None => {
                error!("Bad upstream response: {}", body);
                Err(Error::unexpected_response(body))
            }
        }
    }
}

/// Pulls the answer out of `output[0].content[0].text`.
pub fn extract_text(body: &Value) -> Option<&str> {
    body.pointer("/output/0/content/0/text")
        .and_then(Value::as_str)
}
