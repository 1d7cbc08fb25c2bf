//! # exam-quiz
//!
//! A terminal exam quiz whose multiple-choice questions are written on the
//! fly by a chat-completion model.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exam_quiz::{OpenAiClient, Quiz, QuizConfig, QuizError, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = QuizConfig::default();
//!     let client = OpenAiClient::new(
//!         std::env::var("OPENAI_API_KEY").unwrap_or_default(),
//!         &config.api_base,
//!         config.generation.clone(),
//!         config.retry,
//!     )?;
//!
//!     // Take over the terminal until the user quits
//!     Quiz::new(Session::new(client, &config)).run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
pub mod generation;
pub mod llm;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::{App, StatusKind, StatusLine};
pub use config::{ConfigError, GenerationSettings, QuizConfig};
pub use llm::{ModelError, OpenAiClient, RetryPolicy, TextGenerator};
pub use models::{AppState, HistoryEntry, OPTION_LABELS, Outcome, Question, Score, Style};
pub use session::{ActiveQuestion, Session, SessionError};

/// Error type for quiz setup and the terminal loop.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The API client could not be created.
    #[error("could not set up the model client: {0}")]
    Model(#[from] ModelError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Generate,
    Quit,
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz<G> {
    app: App<G>,
}

impl<G: TextGenerator> Quiz<G> {
    pub fn new(session: Session<G>) -> Self {
        Self {
            app: App::new(session),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// the final score when the user quits.
    pub async fn run(mut self) -> Result<Score, QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        drop(term);
        result.map(|()| self.app.score())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App<G> {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App<G> {
        &mut self.app
    }
}

async fn run_event_loop<G: TextGenerator>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<G>,
) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_input(app, key.code) {
            Action::Continue => {}
            Action::Quit => break,
            Action::Generate => {
                if app.begin_generation() {
                    terminal.draw(|frame| ui::render(frame, app))?;
                    app.generate_question().await;
                    drain_pending_input()?;
                }
            }
        }
    }

    Ok(())
}

/// Drop keys pressed while a question was being generated.
fn drain_pending_input() -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}

/// Map a key press to an app mutation or a loop action.
pub fn handle_input<G: TextGenerator>(app: &mut App<G>, key: KeyCode) -> Action {
    match app.state {
        AppState::Welcome => handle_welcome_input(key),
        AppState::Generating => Action::Continue,
        AppState::Question => handle_question_input(app, key),
        AppState::Error => handle_error_input(key),
    }
}

fn handle_welcome_input(key: KeyCode) -> Action {
    match key {
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => Action::Generate,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::Continue,
    }
}

fn handle_question_input<G: TextGenerator>(app: &mut App<G>, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
            app.select_option((c.to_ascii_lowercase() as u8 - b'a') as usize)
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.can_submit() {
                app.submit_answer();
            } else {
                return Action::Generate;
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') if app.can_generate() => return Action::Generate,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

fn handle_error_input(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Action::Generate,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::Continue,
    }
}
