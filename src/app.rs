use crate::llm::TextGenerator;
use crate::models::{AppState, NUM_OPTIONS, Outcome, Question, Score, Style};
use crate::session::{Session, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Warning,
    Success,
    Failure,
}

/// One-line message under the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusLine {
    fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// UI controller over a [`Session`]: tracks which screen is shown, the
/// highlighted option and the feedback for the last action.
pub struct App<G> {
    pub state: AppState,
    session: Session<G>,
    question: Option<Question>,
    selected_option: Option<usize>,
    outcome: Option<Outcome>,
    status: Option<StatusLine>,
    error: Option<String>,
}

impl<G: TextGenerator> App<G> {
    pub fn new(session: Session<G>) -> Self {
        Self {
            state: AppState::Welcome,
            session,
            question: None,
            selected_option: None,
            outcome: None,
            status: None,
            error: None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn current_style(&self) -> Option<Style> {
        self.session.current().map(|active| active.style)
    }

    /// 1-based number of the question on screen.
    pub fn question_number(&self) -> usize {
        self.session.history().len()
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn score(&self) -> Score {
        self.session.score()
    }

    /// Submitting is possible while a question is shown and unanswered.
    pub fn can_submit(&self) -> bool {
        self.state == AppState::Question && self.outcome.is_none()
    }

    /// A new question may be requested before the first one, after an
    /// error, or once the current question has been answered.
    pub fn can_generate(&self) -> bool {
        match self.state {
            AppState::Welcome | AppState::Error => true,
            AppState::Question => self.outcome.is_some(),
            AppState::Generating => false,
        }
    }

    pub fn select_next_option(&mut self) {
        if self.can_submit() {
            self.selected_option = Some(match self.selected_option {
                Some(index) => (index + 1) % NUM_OPTIONS,
                None => 0,
            });
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.can_submit() {
            self.selected_option = Some(match self.selected_option {
                Some(index) => (index + NUM_OPTIONS - 1) % NUM_OPTIONS,
                None => NUM_OPTIONS - 1,
            });
        }
    }

    pub fn select_option(&mut self, index: usize) {
        if self.can_submit() && index < NUM_OPTIONS {
            self.selected_option = Some(index);
        }
    }

    pub fn submit_answer(&mut self) {
        if self.question.is_none() {
            self.status = Some(StatusLine::new(
                "Please generate a question first.",
                StatusKind::Warning,
            ));
            return;
        }
        if !self.can_submit() {
            return;
        }
        let Some(selected) = self.selected_option else {
            self.status = Some(StatusLine::new(
                "Please select an answer before submitting.",
                StatusKind::Warning,
            ));
            return;
        };

        match self.session.submit_answer(selected) {
            Ok(outcome) => {
                let kind = if outcome.is_correct {
                    StatusKind::Success
                } else {
                    StatusKind::Failure
                };
                self.status = Some(StatusLine::new(outcome.message(), kind));
                self.outcome = Some(outcome);
            }
            Err(err) => {
                log::error!("submit rejected: {}", err);
                self.status = Some(StatusLine::new(err.to_string(), StatusKind::Warning));
            }
        }
    }

    /// Switch to the generating screen. The caller draws a frame, then
    /// awaits [`App::generate_question`].
    pub fn begin_generation(&mut self) -> bool {
        if !self.can_generate() {
            return false;
        }
        self.state = AppState::Generating;
        self.status = None;
        true
    }

    pub async fn generate_question(&mut self) {
        match self.session.start_question().await {
            Ok(question) => {
                self.question = Some(question);
                self.selected_option = None;
                self.outcome = None;
                self.error = None;
                self.status = None;
                self.state = AppState::Question;
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: SessionError) {
        log::error!("could not generate a question: {}", err);
        let hint = if err.is_retryable() {
            "Press [R] to try again."
        } else {
            "Press [Q] to quit."
        };
        self.error = Some(format!("{err}\n\n{hint}"));
        self.state = AppState::Error;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::QuizConfig;
    use crate::models::label_answer;
    use crate::session::tests::{CI_REPLY, ScriptedGenerator};

    fn app(replies: &[&str]) -> App<ScriptedGenerator> {
        let session = Session::with_rng(
            ScriptedGenerator::replying(replies),
            &QuizConfig::default(),
            StdRng::seed_from_u64(3),
        );
        App::new(session)
    }

    async fn generated(replies: &[&str]) -> App<ScriptedGenerator> {
        let mut app = app(replies);
        assert!(app.begin_generation());
        app.generate_question().await;
        app
    }

    #[test]
    fn test_submit_before_generating() {
        let mut app = app(&[]);
        app.submit_answer();

        assert_eq!(
            app.status().map(|s| s.text.as_str()),
            Some("Please generate a question first.")
        );
        assert_eq!(app.score(), Score::default());
    }

    #[tokio::test]
    async fn test_generate_shows_question() {
        let app = generated(&[CI_REPLY]).await;

        assert_eq!(app.state, AppState::Question);
        assert_eq!(app.question_number(), 1);
        assert_eq!(app.current_question().unwrap().text, "What is CI?");
        assert!(app.current_style().is_some());
        assert_eq!(app.selected_option(), None);
        assert!(app.can_submit());
        assert!(!app.can_generate());
    }

    #[tokio::test]
    async fn test_submit_requires_selection() {
        let mut app = generated(&[CI_REPLY]).await;

        app.submit_answer();

        assert_eq!(
            app.status().map(|s| s.kind),
            Some(StatusKind::Warning)
        );
        assert!(app.outcome().is_none());
        assert!(app.can_submit());
    }

    #[tokio::test]
    async fn test_correct_submission_flow() {
        let mut app = generated(&[CI_REPLY]).await;
        let correct = app.current_question().unwrap().correct_index;

        app.select_option(correct);
        app.submit_answer();

        let status = app.status().unwrap();
        assert_eq!(status.text, "Great job, you're correct!");
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(app.score(), Score { correct: 1, wrong: 0 });
        assert!(!app.can_submit());
        assert!(app.can_generate());

        // a second submit is ignored
        app.submit_answer();
        assert_eq!(app.score(), Score { correct: 1, wrong: 0 });
    }

    #[tokio::test]
    async fn test_wrong_submission_names_correct_answer() {
        let mut app = generated(&[CI_REPLY]).await;
        let question = app.current_question().unwrap().clone();
        let wrong = (question.correct_index + 1) % NUM_OPTIONS;

        app.select_option(wrong);
        app.submit_answer();

        let expected = format!(
            "The correct answer was: {}",
            label_answer(question.correct_index, question.correct_answer())
        );
        assert_eq!(app.status().unwrap().text, expected);
        assert_eq!(app.status().unwrap().kind, StatusKind::Failure);
        assert_eq!(app.score(), Score { correct: 0, wrong: 1 });
    }

    #[tokio::test]
    async fn test_selection_wraps_and_locks_after_submit() {
        let mut app = generated(&[CI_REPLY]).await;

        app.select_previous_option();
        assert_eq!(app.selected_option(), Some(3));
        app.select_next_option();
        assert_eq!(app.selected_option(), Some(0));

        app.submit_answer();
        app.select_next_option();
        assert_eq!(app.selected_option(), Some(0));
    }

    #[tokio::test]
    async fn test_generation_failure_shows_error() {
        let mut app = app(&["not a question"]);
        app.begin_generation();
        app.generate_question().await;

        assert_eq!(app.state, AppState::Error);
        assert!(app.error().unwrap().contains("Press [R] to try again."));
        assert!(app.can_generate());
        assert_eq!(app.score(), Score::default());
    }

    #[tokio::test]
    async fn test_cannot_generate_while_question_unanswered() {
        let mut app = generated(&[CI_REPLY]).await;
        assert!(!app.begin_generation());
        assert_eq!(app.state, AppState::Question);
    }
}
