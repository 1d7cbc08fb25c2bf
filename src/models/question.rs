use serde::{Deserialize, Serialize};

use super::Style;

pub const NUM_OPTIONS: usize = 4;

/// Labels shown in front of the options, in display order.
pub const OPTION_LABELS: [char; NUM_OPTIONS] = ['A', 'B', 'C', 'D'];

/// A multiple-choice question with exactly one correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answers: [String; NUM_OPTIONS],
    pub correct_index: usize,
}

impl Question {
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_index]
    }
}

/// Answer text prefixed with its option label, e.g. `B. Kanban`.
pub fn label_answer(index: usize, answer: &str) -> String {
    format!("{}. {}", OPTION_LABELS[index % NUM_OPTIONS], answer)
}

/// A previously generated question, kept to steer the model away from repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub style: Style,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Comparison key for the duplicate check: case-folded, whitespace
    /// collapsed, trailing question marks ignored.
    pub fn normalized(text: &str) -> String {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end_matches('?')
            .trim_end()
            .to_lowercase()
    }

    pub fn matches(&self, text: &str) -> bool {
        Self::normalized(&self.text) == Self::normalized(text)
    }
}
