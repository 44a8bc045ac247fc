use serde::Serialize;

/// Record of one submission.
///
/// Append-only: a session never edits or removes an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt<S> {
    /// Addressed item, `None` for word guesses rejected before matching a target.
    pub item: Option<usize>,
    pub submission: S,
    pub correct: bool,
    /// Elapsed session seconds at submission time.
    pub at: u32,
}
