//! OpenAI-compatible chat-completions client.

use serde::{Deserialize, Serialize};

use crate::config::GenerationSettings;

use super::{ModelError, RetryPolicy, TextGenerator};

/// Longest error body kept in a [`ModelError::Status`].
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.to_string()),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Trimmed text of the first choice.
    pub fn into_text(self) -> Result<String, ModelError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ModelError::EmptyReply)
    }
}

pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    settings: GenerationSettings,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        api_base: &str,
        settings: GenerationSettings,
        retry: RetryPolicy,
    ) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .connect_timeout(retry.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key,
            settings,
            retry,
        })
    }

    fn request(&self, system: &str, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<String, ModelError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        serde_json::from_str::<ChatResponse>(&body)?.into_text()
    }
}

impl TextGenerator for OpenAiClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        let request = self.request(system, prompt);
        log::debug!(
            "requesting completion from {} (model {})",
            self.endpoint,
            request.model
        );

        let text = self.retry.run(|| self.send(&request)).await?;
        log::debug!("raw model reply:\n{}", text);
        Ok(text)
    }
}
