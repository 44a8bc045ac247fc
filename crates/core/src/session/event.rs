use crate::rules::Rejection;
use crate::session::SessionSummary;

/// Discrete outcomes a transition emits for the host to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Resolved { item: usize, correct: bool },
    Rejected { reason: Rejection },
    /// A memory mismatch was turned face down again.
    MismatchCleared,
    Completed(SessionSummary),
    Expired(SessionSummary),
}

impl SessionEvent {
    /// The summary carried by a finishing event.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        match self {
            SessionEvent::Completed(summary) | SessionEvent::Expired(summary) => Some(summary),
            _ => None,
        }
    }
}
