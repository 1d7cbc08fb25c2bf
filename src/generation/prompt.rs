//! Prompt construction for a single question request.

use crate::models::{HistoryEntry, Style};

/// System message sent alongside every prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that writes exam questions.";

/// Topics questions are drawn from unless overridden on the command line.
pub const DEFAULT_TOPICS: [&str; 8] = [
    "SDLC",
    "Agile",
    "DevOps",
    "CI/CD",
    "data ethics",
    "Jira",
    "Kanban",
    "Scrum",
];

const RESPONSE_FORMAT: &str = "\
Question: <question here>
Answers:
- true: <correct answer>
- false: <wrong answer 1>
- false: <wrong answer 2>
- false: <wrong answer 3>";

/// Build the user prompt for one question in the given style.
///
/// `history_tail` is the slice of earlier questions the model is told not to
/// repeat; pass an empty slice for the first question of a session.
pub fn build_prompt<S: AsRef<str>>(
    style: Style,
    topics: &[S],
    history_tail: &[HistoryEntry],
) -> String {
    let topics = topics
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    let mut prompt = format!(
        "You are a software engineering exam question generator. \
         You will generate ONE multiple choice question related to Software Development \
         and Software Engineering topics such as {topics}.\n\n\
         Question style: {}. {}\n",
        style.tag(),
        style.hint()
    );

    if !history_tail.is_empty() {
        prompt.push_str("\nDo not repeat any of these questions:\n");
        for entry in history_tail {
            prompt.push_str(&format!("- {}\n", entry.text));
        }
    }

    prompt.push_str("\nYour response must be formatted exactly like this:\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt.push_str(
        "\n\nWrite the question on a single line. Give exactly one true answer and three false answers, \
         each on its own line. Make the question conceptually challenging, \
         and do NOT make the correct answer obvious.",
    );

    prompt
}

/// The last `window` entries of `history`.
pub fn history_tail(history: &[HistoryEntry], window: usize) -> &[HistoryEntry] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}
