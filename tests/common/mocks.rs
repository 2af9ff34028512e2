use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use vision_relay::{Error, Result, llm::VisionClient};

/// A submission the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub image_base64: String,
    pub prompt: String,
}

#[derive(Debug)]
enum MockReply {
    Text(String),
    Upstream { status: u16, body: Value },
    Unexpected(Value),
    Internal(String),
}

/// Mock vision client for testing
#[derive(Debug)]
pub struct MockVisionClient {
    reply: MockReply,
    pub submissions: Arc<Mutex<Vec<RecordedSubmission>>>,
}

impl MockVisionClient {
    pub fn answering(text: &str) -> Self {
        Self::with_reply(MockReply::Text(text.to_string()))
    }

    pub fn upstream_error(status: u16, body: Value) -> Self {
        Self::with_reply(MockReply::Upstream { status, body })
    }

    pub fn unexpected(body: Value) -> Self {
        Self::with_reply(MockReply::Unexpected(body))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(MockReply::Internal(message.to_string()))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn submit(&self, image_base64: &str, prompt: &str) -> Result<String> {
        self.submissions.lock().unwrap().push(RecordedSubmission {
            image_base64: image_base64.to_string(),
            prompt: prompt.to_string(),
        });

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Upstream { status, body } => Err(Error::upstream(*status, body.clone())),
            MockReply::Unexpected(body) => Err(Error::unexpected_response(body.clone())),
            MockReply::Internal(message) => Err(Error::internal(message.clone())),
        }
    }
}
