//! Session state: history, style rotation, the current question and score.
//!
//! [`Session`] is the only owner of this state. A front end drives it through
//! two actions, [`Session::start_question`] and [`Session::submit_answer`];
//! a failed action leaves score, history and style rotation untouched.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::config::QuizConfig;
use crate::generation::{
    MalformedResponse, SYSTEM_PROMPT, ShuffleError, StyleRotator, build_prompt, history_tail,
    parse_response,
};
use crate::llm::{ModelError, TextGenerator};
use crate::models::{HistoryEntry, Outcome, Question, Score, Style};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the model's reply was not a valid question: {0}")]
    MalformedResponse(#[from] MalformedResponse),
    #[error("the model request failed: {0}")]
    ModelRequestFailure(#[from] ModelError),
    #[error("the model repeated an earlier question: {text:?}")]
    RepeatedQuestion { text: String },
    #[error("could not shuffle answers: {0}")]
    Shuffle(#[from] ShuffleError),
    #[error("no active question; generate one first")]
    NoActiveQuestion,
    #[error("option {index} does not exist (question has {count} answers)")]
    InvalidSelection { index: usize, count: usize },
    #[error("this question has already been answered")]
    AlreadyAnswered,
}

impl SessionError {
    /// Generation failures the user can retry; the rest point at UI logic.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::MalformedResponse(_)
                | SessionError::ModelRequestFailure(_)
                | SessionError::RepeatedQuestion { .. }
                | SessionError::Shuffle(_)
        )
    }
}

/// The question on screen, with the style that produced it and the outcome
/// once answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    pub question: Question,
    pub style: Style,
    pub outcome: Option<Outcome>,
}

pub struct Session<G> {
    generator: G,
    rotator: StyleRotator,
    history: Vec<HistoryEntry>,
    current: Option<ActiveQuestion>,
    score: Score,
    rng: StdRng,
    topics: Vec<String>,
    max_attempts: u32,
    history_window: usize,
}

impl<G: TextGenerator> Session<G> {
    pub fn new(generator: G, config: &QuizConfig) -> Self {
        Self::with_rng(generator, config, StdRng::from_os_rng())
    }

    pub fn with_rng(generator: G, config: &QuizConfig, rng: StdRng) -> Self {
        Self {
            generator,
            rotator: StyleRotator::new(),
            history: Vec::new(),
            current: None,
            score: Score::default(),
            rng,
            topics: config.topics.clone(),
            max_attempts: config.max_attempts.max(1),
            history_window: config.history_window,
        }
    }

    /// Generate, validate and shuffle a new question and make it current.
    ///
    /// One style is chosen per call. Malformed or repeated replies are
    /// re-requested up to the configured attempt count; a failed model
    /// request is returned straight away since the client has already
    /// retried it.
    pub async fn start_question(&mut self) -> Result<Question, SessionError> {
        let snapshot = self.rotator.clone();
        let result = self.generate().await;
        if result.is_err() {
            self.rotator = snapshot;
        }
        result
    }

    async fn generate(&mut self) -> Result<Question, SessionError> {
        let style = self.rotator.next_style(&mut self.rng);
        let prompt = build_prompt(
            style,
            &self.topics,
            history_tail(&self.history, self.history_window),
        );
        log::debug!("prompt for {} question:\n{}", style, prompt);

        let mut attempt = 1;
        loop {
            let raw = self.generator.generate(SYSTEM_PROMPT, &prompt).await?;

            match self.accept(&raw) {
                Ok(question) => {
                    log::info!("new {} question: {}", style, question.text);
                    self.history.push(HistoryEntry::new(question.text.clone(), style));
                    self.current = Some(ActiveQuestion {
                        question: question.clone(),
                        style,
                        outcome: None,
                    });
                    return Ok(question);
                }
                Err(err) if attempt < self.max_attempts => {
                    log::warn!(
                        "rejected model reply (attempt {}/{}): {}",
                        attempt,
                        self.max_attempts,
                        err
                    );
                    attempt += 1;
                }
                Err(err) => {
                    log::warn!("giving up after {} attempts: {}", attempt, err);
                    return Err(err);
                }
            }
        }
    }

    fn accept(&mut self, raw: &str) -> Result<Question, SessionError> {
        let question = parse_response(raw)?;
        if self.history.iter().any(|entry| entry.matches(&question.text)) {
            return Err(SessionError::RepeatedQuestion {
                text: question.text,
            });
        }
        Ok(question.shuffled(&mut self.rng)?)
    }

    /// Grade `selected` against the current question.
    ///
    /// Each question counts once: a second submission is rejected with
    /// [`SessionError::AlreadyAnswered`] and leaves the score unchanged.
    pub fn submit_answer(&mut self, selected: usize) -> Result<Outcome, SessionError> {
        let active = self
            .current
            .as_mut()
            .ok_or(SessionError::NoActiveQuestion)?;

        let count = active.question.answers.len();
        if selected >= count {
            return Err(SessionError::InvalidSelection {
                index: selected,
                count,
            });
        }
        if active.outcome.is_some() {
            return Err(SessionError::AlreadyAnswered);
        }

        let correct_index = active.question.correct_index;
        let outcome = Outcome {
            is_correct: selected == correct_index,
            selected_index: selected,
            correct_index,
            correct_answer: active.question.correct_answer().to_string(),
        };

        self.score.record(outcome.is_correct);
        active.outcome = Some(outcome.clone());
        log::info!(
            "answer {} ({}); score {} correct, {} wrong",
            selected,
            if outcome.is_correct { "correct" } else { "wrong" },
            self.score.correct,
            self.score.wrong
        );
        Ok(outcome)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn current(&self) -> Option<&ActiveQuestion> {
        self.current.as_ref()
    }

    pub fn used_styles(&self) -> &HashSet<Style> {
        self.rotator.used()
    }
}
