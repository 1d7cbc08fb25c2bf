//! Strict parser for the model's free-text reply.
//!
//! The accepted grammar, one item per line, blank lines ignored:
//!
//! ```text
//! Question: <question text>
//! Answers:                      (optional header)
//! - true: <correct answer>
//! - false: <wrong answer>       (three of these, any order)
//! ```
//!
//! Bullets (`-`, `*`, `+`, `•`, en and em dashes, `1.`, `a)`) and bold or
//! italic markup wrapping a marker are tolerated; the text after a marker is
//! kept verbatim. Header, style-tag and pure decoration lines are
//! discarded. Anything that does not produce exactly four answers with a
//! single `true` is rejected as [`MalformedResponse`].

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{NUM_OPTIONS, Question};

const QUESTION_MARKER: &str = "question";
const SECTION_HEADERS: [&str; 4] = ["answers", "answer", "options", "choices"];
const TAG_PREFIXES: [&str; 4] = ["style:", "question style:", "type:", "difficulty:"];

/// The reply does not follow the requested line grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("response is empty")]
    Empty,
    #[error("first line does not start with `Question:`: {line:?}")]
    MissingQuestionMarker { line: String },
    #[error("question text is empty")]
    EmptyQuestion,
    #[error("answer line {line} has no text")]
    EmptyAnswer { line: usize },
    #[error("no answer is marked true")]
    NoCorrectAnswer,
    #[error("{count} answers are marked true")]
    MultipleCorrectAnswers { count: usize },
    #[error("expected 4 answers, found {found}")]
    AnswerCount { found: usize },
    #[error("answer {text:?} appears more than once")]
    DuplicateAnswer { text: String },
    #[error("correct answer {text:?} is not among the answers")]
    CorrectAnswerMissing { text: String },
}

/// Parse a raw model reply into a [`Question`].
///
/// The returned `correct_index` refers to the order the model wrote the
/// answers in; shuffle before display.
pub fn parse_response(raw: &str) -> Result<Question, MalformedResponse> {
    let mut lines = raw
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !is_annotation(line));

    let (_, first) = lines.next().ok_or(MalformedResponse::Empty)?;
    let text = strip_question_marker(first).ok_or_else(|| {
        MalformedResponse::MissingQuestionMarker {
            line: first.to_string(),
        }
    })?;
    if text.is_empty() {
        return Err(MalformedResponse::EmptyQuestion);
    }

    let mut answers: Vec<String> = Vec::with_capacity(NUM_OPTIONS);
    let mut correct: Vec<String> = Vec::new();

    for (number, line) in lines {
        let Some((is_correct, answer)) = parse_answer_line(line) else {
            log::debug!("ignoring unrecognised line {}: {:?}", number + 1, line);
            continue;
        };
        if answer.is_empty() {
            return Err(MalformedResponse::EmptyAnswer { line: number + 1 });
        }
        if is_correct {
            correct.push(answer.to_string());
        }
        answers.push(answer.to_string());
    }

    let correct_text = match correct.len() {
        0 => return Err(MalformedResponse::NoCorrectAnswer),
        1 => correct.remove(0),
        count => return Err(MalformedResponse::MultipleCorrectAnswers { count }),
    };

    let answers: [String; NUM_OPTIONS] = answers
        .try_into()
        .map_err(|found: Vec<String>| MalformedResponse::AnswerCount { found: found.len() })?;

    let mut seen = HashSet::with_capacity(NUM_OPTIONS);
    if let Some(duplicate) = answers.iter().find(|a| !seen.insert(a.as_str())) {
        return Err(MalformedResponse::DuplicateAnswer {
            text: duplicate.clone(),
        });
    }

    let correct_index = answers
        .iter()
        .position(|a| *a == correct_text)
        .ok_or(MalformedResponse::CorrectAnswerMissing { text: correct_text })?;

    Ok(Question {
        text: text.to_string(),
        answers,
        correct_index,
    })
}

fn is_emphasis(c: char) -> bool {
    matches!(c, '*' | '_' | '#' | '`')
}

fn is_annotation(line: &str) -> bool {
    if line
        .chars()
        .all(|c| matches!(c, '-' | '=' | '~' | '*' | '_' | '`' | '#') || c.is_whitespace())
    {
        return true;
    }

    let core = line.trim_matches(|c: char| is_emphasis(c) || c.is_whitespace());
    if core.starts_with('[') && core.ends_with(']') {
        return true;
    }

    let lower = core.to_lowercase();
    let header = lower.trim_end_matches(':').trim_end_matches(is_emphasis).trim();
    if SECTION_HEADERS.contains(&header) {
        return true;
    }

    TAG_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

fn strip_question_marker(line: &str) -> Option<&str> {
    let line = line.trim_start_matches(|c: char| c == '#' || c.is_whitespace());
    let (marker, text) = split_marker(line)?;
    marker.eq_ignore_ascii_case(QUESTION_MARKER).then_some(text)
}

/// Leading run of `*` or `_` opening bold or italic markup.
fn emphasis_run(line: &str) -> &str {
    let end = line
        .find(|c: char| c != '*' && c != '_')
        .unwrap_or(line.len());
    &line[..end]
}

/// Split `<marker>: <text>` where the marker may be wrapped in emphasis,
/// as in `**true:** text`, `**true**: text` or `**true: text**`.
///
/// Markup is only removed when it pairs with an opening run in front of the
/// marker; the text is otherwise returned as written.
fn split_marker(line: &str) -> Option<(&str, &str)> {
    let open = emphasis_run(line);
    let (marker, rest) = line[open.len()..].split_once(':')?;
    let marker = marker.trim();
    if open.is_empty() {
        return Some((marker, rest.trim()));
    }

    if let Some(marker) = marker.strip_suffix(open) {
        return Some((marker.trim_end(), rest.trim()));
    }
    if let Some(rest) = rest.strip_prefix(open) {
        return Some((marker, rest.trim()));
    }
    let rest = rest.trim();
    Some((marker, rest.strip_suffix(open).map_or(rest, str::trim_end)))
}

/// Remove list bullets and ordered-list prefixes such as `1.` or `b)`.
fn strip_bullet(line: &str) -> &str {
    let mut line = line.trim_start();
    loop {
        let mut chars = line.chars();
        match chars.next() {
            Some('-' | '+' | '•' | '–' | '—') => line = chars.as_str().trim_start(),
            // a lone `*` is a bullet, `**` opens bold text
            Some('*') if chars.as_str().starts_with(char::is_whitespace) => {
                line = chars.as_str().trim_start()
            }
            _ => break,
        }
    }

    let mut chars = line.char_indices();
    let prefix_end = match chars.next() {
        Some((_, c)) if c.is_ascii_digit() => {
            let digits_end = line
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            Some(digits_end)
        }
        Some((_, c)) if c.is_ascii_alphabetic() => chars.next().map(|(i, _)| i),
        _ => None,
    };

    if let Some(end) = prefix_end {
        let rest = &line[end..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if after.starts_with(char::is_whitespace) {
                return after.trim_start();
            }
        }
    }
    line
}

fn parse_answer_line(line: &str) -> Option<(bool, &str)> {
    let (marker, text) = split_marker(strip_bullet(line))?;

    let is_correct = if marker.eq_ignore_ascii_case("true") {
        true
    } else if marker.eq_ignore_ascii_case("false") {
        false
    } else {
        return None;
    };
    Some((is_correct, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CI_REPLY: &str = "Question: What is CI?\n- true: Continuous Integration\n- false: Continuous Isolation\n- false: Customer Input\n- false: Code Injection";

    #[test]
    fn test_parses_documented_example() {
        let question = parse_response(CI_REPLY).unwrap();

        assert_eq!(question.text, "What is CI?");
        assert_eq!(
            question.answers,
            [
                "Continuous Integration",
                "Continuous Isolation",
                "Customer Input",
                "Code Injection"
            ]
        );
        assert_eq!(question.correct_index, 0);
        assert_eq!(question.correct_answer(), "Continuous Integration");
    }

    #[test]
    fn test_accepts_header_blank_lines_and_style_tags() {
        let raw = "\n[scenario-based]\nQuestion: A team misses every sprint goal. What should the Scrum Master do first?\n\nAnswers:\n- false: Extend the sprint\n- false: Add more developers\n- true: Facilitate a retrospective on the causes\n- false: Skip the daily stand-up\nStyle: scenario-based\n";
        let question = parse_response(raw).unwrap();

        assert!(question.text.starts_with("A team misses every sprint goal"));
        assert_eq!(question.correct_index, 2);
        assert_eq!(
            question.correct_answer(),
            "Facilitate a retrospective on the causes"
        );
    }

    #[test]
    fn test_accepts_markdown_and_numbered_bullets() {
        let raw = "**Question:** Which board limits work in progress?\n---\n1. **true:** Kanban\n2. false: Gantt\n3) FALSE: PERT\n* False: Burn-up";
        let question = parse_response(raw).unwrap();

        assert_eq!(question.text, "Which board limits work in progress?");
        assert_eq!(question.answers, ["Kanban", "Gantt", "PERT", "Burn-up"]);
        assert_eq!(question.correct_index, 0);
    }

    #[test]
    fn test_answer_text_may_contain_colons() {
        let raw = "Question: Which YAML key starts a GitHub Actions job list?\n- true: jobs: (top-level key)\n- false: steps:\n- false: runs-on:\n- false: on: push";
        let question = parse_response(raw).unwrap();
        assert_eq!(question.correct_answer(), "jobs: (top-level key)");
    }

    #[test]
    fn test_ignores_unrecognised_lines() {
        let raw = format!("{CI_REPLY}\nExplanation: CI merges work frequently.");
        assert_eq!(parse_response(&raw).unwrap().answers.len(), 4);
    }

    #[test]
    fn test_rejects_empty_reply() {
        assert_eq!(parse_response("  \n\n"), Err(MalformedResponse::Empty));
    }

    #[test]
    fn test_rejects_missing_question_marker() {
        let raw = "What is CI?\n- true: a\n- false: b\n- false: c\n- false: d";
        assert!(matches!(
            parse_response(raw),
            Err(MalformedResponse::MissingQuestionMarker { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_question() {
        let raw = "Question:   \n- true: a\n- false: b\n- false: c\n- false: d";
        assert_eq!(parse_response(raw), Err(MalformedResponse::EmptyQuestion));
    }

    #[test]
    fn test_rejects_zero_correct() {
        let raw = "Question: Q?\n- false: a\n- false: b\n- false: c\n- false: d";
        assert_eq!(parse_response(raw), Err(MalformedResponse::NoCorrectAnswer));
    }

    #[test]
    fn test_rejects_two_correct() {
        let raw = "Question: Q?\n- true: a\n- true: b\n- false: c\n- false: d";
        assert_eq!(
            parse_response(raw),
            Err(MalformedResponse::MultipleCorrectAnswers { count: 2 })
        );
    }

    #[test]
    fn test_rejects_too_few_answers() {
        let raw = "Question: Q?\n- true: a\n- false: b\n- false: c";
        assert_eq!(
            parse_response(raw),
            Err(MalformedResponse::AnswerCount { found: 3 })
        );
    }

    #[test]
    fn test_rejects_too_many_answers() {
        let raw = "Question: Q?\n- true: a\n- false: b\n- false: c\n- false: d\n- false: e";
        assert_eq!(
            parse_response(raw),
            Err(MalformedResponse::AnswerCount { found: 5 })
        );
    }

    #[test]
    fn test_rejects_duplicate_answers() {
        let raw = "Question: Q?\n- true: a\n- false: b\n- false: b\n- false: d";
        assert_eq!(
            parse_response(raw),
            Err(MalformedResponse::DuplicateAnswer {
                text: "b".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_empty_answer() {
        let raw = "Question: Q?\n- true: a\n- false:\n- false: c\n- false: d";
        assert_eq!(
            parse_response(raw),
            Err(MalformedResponse::EmptyAnswer { line: 3 })
        );
    }

    #[test]
    fn test_well_formed_replies_in_any_order() {
        let answers = ["alpha", "beta", "gamma", "delta"];
        for correct in 0..4 {
            let mut raw = String::from("Question: Which one?\n");
            for (i, answer) in answers.iter().enumerate() {
                let marker = if i == correct { "true" } else { "false" };
                raw.push_str(&format!("- {marker}: {answer}\n"));
            }

            let question = parse_response(&raw).unwrap();
            assert_eq!(question.answers.len(), 4);
            assert_eq!(question.correct_index, correct);
            assert!(question.answers.contains(&answers[correct].to_string()));
        }
    }

    #[test]
    fn test_strip_bullet_keeps_plain_markers() {
        assert_eq!(strip_bullet("true: x"), "true: x");
        assert_eq!(strip_bullet("- false: x"), "false: x");
        assert_eq!(strip_bullet("• true: x"), "true: x");
        assert_eq!(strip_bullet("b) false: x"), "false: x");
        assert_eq!(strip_bullet("12. true: x"), "true: x");
        assert_eq!(strip_bullet("– true: x"), "true: x");
        assert_eq!(strip_bullet("— false: x"), "false: x");
        assert_eq!(strip_bullet("**true:** x"), "**true:** x");
    }

    #[test]
    fn test_accepts_dash_bullets() {
        let raw = "Question: What does WIP stand for?\n– true: Work in progress\n– false: Weekly integration plan\n— false: Waterfall iteration phase\n— false: Workflow input port";
        let question = parse_response(raw).unwrap();

        assert_eq!(question.correct_answer(), "Work in progress");
        assert_eq!(question.answers[3], "Workflow input port");
    }

    #[test]
    fn test_keeps_code_and_symbols_in_text() {
        let raw = "Question: `npm ci` vs `npm install`: which is right for CI?\n- true: `npm ci`\n- false: `npm install`\n- false: *args-style flags\n- false: #!/bin/sh wrapper";
        let question = parse_response(raw).unwrap();

        assert_eq!(
            question.text,
            "`npm ci` vs `npm install`: which is right for CI?"
        );
        assert_eq!(
            question.answers,
            [
                "`npm ci`",
                "`npm install`",
                "*args-style flags",
                "#!/bin/sh wrapper"
            ]
        );
        assert_eq!(question.correct_index, 0);
    }

    #[test]
    fn test_strips_only_emphasis_wrapping_the_marker() {
        let raw = "## **Question: Which flag skips the lockfile check?**\n- **true**: `--no-frozen-lockfile`\n- __false:__ `--offline`\n- *false: _private modules_*\n- false: **bold** claims";
        let question = parse_response(raw).unwrap();

        assert_eq!(question.text, "Which flag skips the lockfile check?");
        assert_eq!(
            question.answers,
            [
                "`--no-frozen-lockfile`",
                "`--offline`",
                "_private modules_",
                "**bold** claims"
            ]
        );
    }
}
