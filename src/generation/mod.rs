//! Question generation pipeline: style rotation, prompt building, reply
//! parsing and answer shuffling. Everything here is free of I/O.

mod parser;
mod prompt;
mod rotator;
mod shuffle;

pub use parser::{MalformedResponse, parse_response};
pub use prompt::{DEFAULT_TOPICS, SYSTEM_PROMPT, build_prompt, history_tail};
pub use rotator::StyleRotator;
pub use shuffle::{ShuffleError, shuffle_answers};
