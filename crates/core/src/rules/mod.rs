//! Per-variant policies plugged into the session engine.
//!
//! A [`Ruleset`] decides what a submission addresses, whether it is right,
//! how the board changes, and how the attempt log turns into points.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::session::{Attempt, SessionError, SessionKind};

mod memory;
mod quiz;
mod words;

pub use memory::{BoardCard, Face, Flip, MemoryBoard, MemoryMatch, MemoryRules, Mismatch, Shuffle};
pub use quiz::{Answer, Quiz, QuizBoard, QuizRules};
pub use words::{Guess, WordBoard, WordBuilder, WordRules};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("points per match must be > 0")]
    InvalidMatchPoints,

    #[error("bonus floor ({floor}) must not exceed bonus baseline ({baseline})")]
    InvalidBonusBounds { baseline: u32, floor: u32 },

    #[error("minimum word length must be > 0")]
    InvalidMinWordLength,

    #[error("points per letter must be > 0")]
    InvalidLetterPoints,
}

//
// ─── JUDGEMENT ─────────────────────────────────────────────────────────────────
//

/// Why a word-builder guess was turned away without touching any item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    TooShort { len: usize, min: usize },
    NotInPool,
    NotInList,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooShort { min, .. } => write!(f, "words must be at least {min} letters long"),
            Rejection::NotInPool => f.write_str("word cannot be made from the available letters"),
            Rejection::NotInList => f.write_str("word is not one of the target words"),
        }
    }
}

/// A ruleset's ruling on a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    /// The item is resolved correctly.
    Correct { item: usize },
    /// Wrong answer. `settles` marks the item as answered for good (quiz);
    /// otherwise it stays in play (memory mismatch).
    Incorrect { item: usize, settles: bool },
    /// Normal-flow refusal that addresses no item.
    Rejected(Rejection),
}

impl Judgement {
    #[must_use]
    pub fn item(&self) -> Option<usize> {
        match self {
            Judgement::Correct { item } | Judgement::Incorrect { item, .. } => Some(*item),
            Judgement::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Judgement::Correct { .. })
    }

    #[must_use]
    pub fn settles(&self) -> bool {
        match self {
            Judgement::Correct { .. } => true,
            Judgement::Incorrect { settles, .. } => *settles,
            Judgement::Rejected(_) => false,
        }
    }
}

/// Inputs for the one-off completion bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusContext {
    pub elapsed: u32,
    pub remaining: Option<u32>,
    pub moves: u32,
    pub cleared: bool,
}

//
// ─── RULESET ───────────────────────────────────────────────────────────────────
//

pub trait Ruleset: Clone + fmt::Debug {
    /// Immutable content unit.
    type Item: Clone + fmt::Debug;
    /// What the player hands in; it carries its own item address.
    type Submission: Clone + fmt::Debug;
    /// Mutable per-session progress.
    type Board: Clone + fmt::Debug;

    fn kind(&self) -> SessionKind;

    /// Whether the host may move an active-item cursor.
    fn navigable(&self) -> bool {
        false
    }

    /// Whether a navigable cursor may move back to earlier items.
    fn backtracks(&self) -> bool {
        true
    }

    /// Whether resolving every item finishes the session on its own.
    fn completes_when_cleared(&self) -> bool {
        true
    }

    fn board(&self, content: &[Self::Item]) -> Self::Board;

    /// Validate `submission` against the addressed item.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for bad indexes, resubmissions the policy
    /// forbids, or a board that cannot take input right now.
    fn judge(
        &self,
        content: &[Self::Item],
        board: &Self::Board,
        submission: &Self::Submission,
    ) -> Result<Judgement, SessionError>;

    /// Apply an accepted judgement to the board.
    fn record(
        &self,
        board: &mut Self::Board,
        submission: &Self::Submission,
        judgement: &Judgement,
        elapsed: u32,
    );

    /// Age transient board state. Returns true if something was cleared.
    fn on_tick(&self, _board: &mut Self::Board, _elapsed: u32) -> bool {
        false
    }

    /// Clear transient board state immediately. Returns true if something was cleared.
    fn dismiss(&self, _board: &mut Self::Board) -> bool {
        false
    }

    /// Number of items that are out of play.
    fn resolved_count(&self, board: &Self::Board) -> usize;

    /// Score earned so far; a pure function of the attempt log.
    fn base_score(&self, content: &[Self::Item], attempts: &[Attempt<Self::Submission>]) -> u32;

    /// Bonus granted once at completion.
    fn bonus(&self, _ctx: &BonusContext) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgement_reports_item_and_settling() {
        let correct = Judgement::Correct { item: 2 };
        assert_eq!(correct.item(), Some(2));
        assert!(correct.is_correct());
        assert!(correct.settles());

        let missed = Judgement::Incorrect {
            item: 1,
            settles: false,
        };
        assert!(!missed.settles());

        let rejected = Judgement::Rejected(Rejection::NotInList);
        assert_eq!(rejected.item(), None);
        assert!(!rejected.is_correct());
    }

    #[test]
    fn rejection_messages_read_naturally() {
        assert_eq!(
            Rejection::TooShort { len: 2, min: 3 }.to_string(),
            "words must be at least 3 letters long"
        );
    }
}
