mod question;
mod score;
mod state;
mod style;

pub use question::{HistoryEntry, NUM_OPTIONS, OPTION_LABELS, Question, label_answer};
pub use score::{Outcome, Score};
pub use state::AppState;
pub use style::Style;
