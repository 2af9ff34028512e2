use serde::Serialize;

/// Request body for the Responses API.
#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub temperature: f32,
    pub input: Vec<InputMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: Vec<InputContent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputContent {
    InputText { text: String },
    /// `image_url` is a plain string (a data URL), not an object.
    InputImage { image_url: String },
}

impl ResponsesRequest {
    pub fn vision(model: &str, temperature: f32, image_base64: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            temperature,
            input: vec![InputMessage {
                role: "user".to_string(),
                content: vec![
                    InputContent::InputText {
                        text: prompt.to_string(),
                    },
                    InputContent::InputImage {
                        image_url: jpeg_data_url(image_base64),
                    },
                ],
            }],
        }
    }
}

fn jpeg_data_url(image_base64: &str) -> String {
    format!("data:image/jpeg;base64,{}", image_base64)
}
