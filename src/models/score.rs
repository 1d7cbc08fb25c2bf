use serde::{Deserialize, Serialize};

use super::label_answer;

/// Running tally for the session. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub wrong: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.correct + self.wrong
    }

    pub fn percentage(&self) -> f64 {
        let total = self.total();
        if total > 0 {
            (self.correct as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }

    pub(crate) fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
    }
}

/// Result of submitting an answer, with enough detail to render feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub is_correct: bool,
    pub selected_index: usize,
    pub correct_index: usize,
    pub correct_answer: String,
}

impl Outcome {
    /// Feedback line shown after a submission.
    pub fn message(&self) -> String {
        if self.is_correct {
            "Great job, you're correct!".to_string()
        } else {
            format!(
                "The correct answer was: {}",
                label_answer(self.correct_index, &self.correct_answer)
            )
        }
    }
}
