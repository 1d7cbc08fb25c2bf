//! Text-generation backend.
//!
//! [`TextGenerator`] is the seam the session talks to; [`OpenAiClient`] is
//! the production implementation against an OpenAI-compatible
//! chat-completions endpoint.

mod openai;
mod retry;

use std::time::Duration;

use thiserror::Error;

pub use openai::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, OpenAiClient};
pub use retry::RetryPolicy;

/// Produces free-form text for a prompt.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ModelError>;
}

/// Failure talking to the text-generation API.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API response contained no message text")]
    EmptyReply,
}

impl ModelError {
    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelError::Timeout(_) => true,
            ModelError::Http(err) => err.is_timeout() || err.is_connect(),
            ModelError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            ModelError::Decode(_) | ModelError::EmptyReply => false,
        }
    }
}
