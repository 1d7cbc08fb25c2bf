use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::models::{NUM_OPTIONS, Question};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShuffleError {
    #[error("correct answer {text:?} is not among the answers")]
    Missing { text: String },
    #[error("correct answer {text:?} appears {count} times")]
    Ambiguous { text: String, count: usize },
}

/// Randomly permute `answers` and return the new index of `correct`.
///
/// `correct` must occur exactly once; the parser guarantees this for its
/// output.
pub fn shuffle_answers<R: Rng + ?Sized>(
    mut answers: [String; NUM_OPTIONS],
    correct: &str,
    rng: &mut R,
) -> Result<([String; NUM_OPTIONS], usize), ShuffleError> {
    answers.shuffle(rng);

    let mut matches = answers
        .iter()
        .enumerate()
        .filter(|(_, answer)| answer.as_str() == correct)
        .map(|(i, _)| i);

    match (matches.next(), matches.count()) {
        (Some(index), 0) => Ok((answers, index)),
        (Some(_), rest) => Err(ShuffleError::Ambiguous {
            text: correct.to_string(),
            count: rest + 1,
        }),
        (None, _) => Err(ShuffleError::Missing {
            text: correct.to_string(),
        }),
    }
}

impl Question {
    /// Same question with the answers in a random display order.
    pub fn shuffled<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Question, ShuffleError> {
        let correct = self.correct_answer().to_string();
        let (answers, correct_index) = shuffle_answers(self.answers, &correct, rng)?;
        Ok(Question {
            text: self.text,
            answers,
            correct_index,
        })
    }
}
