use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::SessionId;
use crate::session::{SessionKind, SessionStatus};

/// Frozen result of a finished session.
///
/// Built exactly once, when the session becomes `Complete` or `Expired`;
/// later reads return the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    session_id: SessionId,
    kind: SessionKind,
    status: SessionStatus,
    base_score: u32,
    bonus: u32,
    correct_count: usize,
    total_count: usize,
    attempts: usize,
    elapsed_seconds: u32,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        session_id: SessionId,
        kind: SessionKind,
        status: SessionStatus,
        base_score: u32,
        bonus: u32,
        correct_count: usize,
        total_count: usize,
        attempts: usize,
        elapsed_seconds: u32,
    ) -> Self {
        Self {
            session_id,
            kind,
            status,
            base_score,
            bonus,
            correct_count,
            total_count,
            attempts,
            elapsed_seconds,
            completed_at: None,
        }
    }

    /// Attach the wall-clock completion time. The engine never reads a clock,
    /// so hosts stamp summaries when they receive them.
    #[must_use]
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Final score: base score plus the completion bonus.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.base_score.saturating_add(self.bonus)
    }

    #[must_use]
    pub fn base_score(&self) -> u32 {
        self.base_score
    }

    #[must_use]
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of submissions, including misses and rejections.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total: usize,
    pub resolved: usize,
    pub remaining: usize,
    pub is_finished: bool,
}

impl SessionProgress {
    /// Resolved share in whole percent, rounded down.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.resolved.saturating_mul(100) / self.total;
        u32::try_from(pct).unwrap_or(100)
    }
}
