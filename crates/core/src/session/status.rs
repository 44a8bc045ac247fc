use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a session.
///
/// `Idle → Running ⇄ Paused`, then `Complete` or `Expired`. A finished session
/// never runs again; `reset`, `restart` and `next_level` build a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
    Complete,
    Expired,
}

impl SessionStatus {
    /// Running or paused: started and not yet finished.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Running | SessionStatus::Paused)
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Expired)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::Complete => "complete",
            SessionStatus::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// Which ruleset produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Quiz,
    MemoryMatch,
    WordBuilder,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionKind::Quiz => "quiz",
            SessionKind::MemoryMatch => "memory-match",
            SessionKind::WordBuilder => "word-builder",
        };
        f.write_str(label)
    }
}
