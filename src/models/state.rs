/// Screen currently shown by the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    /// Waiting on the model; input is ignored.
    Generating,
    Question,
    /// The last generate action failed and can be retried.
    Error,
}
