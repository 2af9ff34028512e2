use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct VisionRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Anything but a string is ignored so the default prompt applies.
    #[serde(default, deserialize_with = "string_or_none")]
    pub prompt: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

impl VisionRequest {
    /// Decodes a request body. Bodies that are blank or not declared as
    /// JSON decode to an empty request, which then fails image validation.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> serde_json::Result<Self> {
        let is_json = content_type.is_some_and(is_json_content_type);
        if !is_json || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// The image, if one was sent. Empty strings count as absent.
    pub fn image(&self) -> Option<&str> {
        self.image_base64.as_deref().filter(|s| !s.is_empty())
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            message: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || essence.to_ascii_lowercase().ends_with("+json")
}
