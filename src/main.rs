use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use exam_quiz::config::{
    DEFAULT_API_BASE, DEFAULT_HISTORY_WINDOW, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use exam_quiz::generation::DEFAULT_TOPICS;
use exam_quiz::{
    ConfigError, GenerationSettings, OpenAiClient, Quiz, QuizConfig, RetryPolicy, Session,
};

#[derive(Parser, Debug)]
#[command(version, about = "Software engineering exam questions, generated on demand", long_about = None)]
struct Args {
    /// API key for the chat-completions endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Model used to write questions
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Maximum tokens in a reply
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Seconds to wait for a single API request
    #[arg(long, default_value_t = 30, value_parser = RangedU64ValueParser::<u64>::new().range(1..=600))]
    timeout: u64,

    /// Retries for a failed API request (timeouts, rate limits, server errors)
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Replies requested per question before giving up on malformed output
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,

    /// Earlier questions quoted in the prompt to avoid repeats
    #[arg(long, default_value_t = DEFAULT_HISTORY_WINDOW)]
    history_window: usize,

    /// Topic to draw questions from; repeat to give several
    #[arg(long = "topic", value_name = "TOPIC")]
    topics: Vec<String>,
}

impl Args {
    fn config(&self) -> QuizConfig {
        let topics = if self.topics.is_empty() {
            DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
        } else {
            self.topics.clone()
        };

        QuizConfig {
            api_base: self.api_base.clone(),
            generation: GenerationSettings {
                model: self.model.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            },
            retry: RetryPolicy {
                max_retries: self.retries,
                timeout: Duration::from_secs(self.timeout),
                ..RetryPolicy::default()
            },
            max_attempts: self.attempts,
            history_window: self.history_window,
            topics,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key may come from the environment
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let args = Args::parse();
    let config = args.config();
    config.validate()?;

    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    log::info!(
        "starting quiz with model {} on {} topics",
        config.generation.model,
        config.topics.len()
    );

    let client = OpenAiClient::new(
        api_key,
        &config.api_base,
        config.generation.clone(),
        config.retry,
    )
    .context("failed to create the API client")?;

    let score = Quiz::new(Session::new(client, &config)).run().await?;

    println!(
        "Final score: {} correct, {} wrong ({:.0}%)",
        score.correct,
        score.wrong,
        score.percentage()
    );
    Ok(())
}
