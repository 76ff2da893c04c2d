//! Coach chat messages (`/api/ai/chat`).

use serde::{Deserialize, Serialize};

/// A message to the AI coach. The server assumes 5 for any rating left out.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guilt_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regret_level: Option<u8>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Coach reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
