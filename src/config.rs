//! Runtime configuration shared by the session and the API client.

use thiserror::Error;

use crate::generation::DEFAULT_TOPICS;
use crate::llm::RetryPolicy;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_HISTORY_WINDOW: usize = 25;

/// Parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    pub api_base: String,
    pub generation: GenerationSettings,
    pub retry: RetryPolicy,
    /// Replies requested per "generate" action before giving up on
    /// malformed or repeated questions.
    pub max_attempts: u32,
    /// How many earlier questions are quoted back in the prompt.
    pub history_window: usize,
    pub topics: Vec<String>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            generation: GenerationSettings::default(),
            retry: RetryPolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            history_window: DEFAULT_HISTORY_WINDOW,
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("at least one topic is required")]
    NoTopics,
    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    Temperature(f32),
    #[error("max tokens must be at least 1")]
    MaxTokens,
    #[error("attempts must be at least 1")]
    MaxAttempts,
    #[error("model name must not be empty")]
    Model,
    #[error("API key is missing; set OPENAI_API_KEY or pass --api-key")]
    MissingApiKey,
}

impl QuizConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topics.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::NoTopics);
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::Temperature(self.generation.temperature));
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::MaxTokens);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::MaxAttempts);
        }
        if self.generation.model.trim().is_empty() {
            return Err(ConfigError::Model);
        }
        Ok(())
    }
}
