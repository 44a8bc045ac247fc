//! User-facing notices for session outcomes.
//!
//! This is intentionally **not** a rendering layer: a notice is a title, a
//! description and a tone. Hosts decide how to show it.

use play_core::model::Question;
use play_core::rules::{MemoryMatch, Quiz, Rejection, Ruleset, WordBuilder};
use play_core::{Session, SessionError, SessionEvent, SessionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub tone: Tone,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.to_owned(),
            description: description.into(),
            tone,
        }
    }

    #[must_use]
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, Tone::Success)
    }

    #[must_use]
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, Tone::Info)
    }

    #[must_use]
    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, Tone::Error)
    }

    /// Shown once the last word-builder level is finished.
    #[must_use]
    pub fn all_levels_complete() -> Self {
        Self::success("Congratulations!", "You've completed all levels!")
    }
}

/// Per-ruleset wording for events and refusals.
pub trait Announce: Ruleset {
    /// Notice for `event`, read against the session the event produced.
    fn announce(session: &Session<Self>, event: &SessionEvent) -> Option<Notice>;

    /// Notice for a refused action.
    fn refusal(error: &SessionError) -> Notice {
        Notice::error("Not allowed", error.to_string())
    }
}

fn time_up(summary: &SessionSummary, what: &str) -> Notice {
    Notice::info(
        "Time's up!",
        format!(
            "You got {} of {} {what}. Score: {}",
            summary.correct_count(),
            summary.total_count(),
            summary.score()
        ),
    )
}

fn quiz_feedback(question: &Question, correct: bool) -> Notice {
    let explanation = question.explanation().unwrap_or_default();
    if correct {
        return Notice::success("Correct!", explanation);
    }
    let answer = question.option(question.correct()).unwrap_or_default();
    let description = if explanation.is_empty() {
        format!("The answer is {answer}.")
    } else {
        format!("The answer is {answer}. {explanation}")
    };
    Notice::error("Incorrect!", description)
}

impl Announce for Quiz {
    fn announce(session: &Session<Self>, event: &SessionEvent) -> Option<Notice> {
        match event {
            SessionEvent::Resolved { item, correct } => session
                .item(*item)
                .map(|question| quiz_feedback(question, *correct)),
            SessionEvent::Completed(summary) => Some(Notice::success(
                "Quiz Complete!",
                format!(
                    "You scored {}% ({}/{})",
                    summary.score(),
                    summary.correct_count(),
                    summary.total_count()
                ),
            )),
            SessionEvent::Expired(summary) => Some(time_up(summary, "questions right")),
            _ => None,
        }
    }

    fn refusal(error: &SessionError) -> Notice {
        match error {
            SessionError::AlreadyResolved { .. } => {
                Notice::error("Already answered", "Each question takes one answer.")
            }
            SessionError::InvalidOption { options, .. } => {
                Notice::error("No such option", format!("Pick one of the {options} options."))
            }
            other => Notice::error("Not allowed", other.to_string()),
        }
    }
}

impl Announce for MemoryMatch {
    fn announce(_session: &Session<Self>, event: &SessionEvent) -> Option<Notice> {
        match event {
            SessionEvent::Resolved { correct: true, .. } => {
                Some(Notice::success("Great match!", "Keep going!"))
            }
            SessionEvent::Completed(summary) if summary.bonus() > 0 => Some(Notice::success(
                "Congratulations!",
                format!("Game completed! Bonus: {} points", summary.bonus()),
            )),
            SessionEvent::Completed(summary) => Some(Notice::info(
                "Game over",
                format!("Final score: {}", summary.score()),
            )),
            SessionEvent::Expired(summary) => Some(time_up(summary, "pairs")),
            _ => None,
        }
    }

    fn refusal(error: &SessionError) -> Notice {
        match error {
            SessionError::BoardLocked => {
                Notice::error("Hold on", "Wait for the cards to turn back over.")
            }
            SessionError::SameCard { .. } => {
                Notice::error("Same card", "Pick two different cards.")
            }
            SessionError::AlreadyResolved { .. } => {
                Notice::error("Already matched", "That card is already matched.")
            }
            other => Notice::error("Not allowed", other.to_string()),
        }
    }
}

impl Announce for WordBuilder {
    fn announce(session: &Session<Self>, event: &SessionEvent) -> Option<Notice> {
        match event {
            SessionEvent::Resolved {
                item,
                correct: true,
            } => {
                let points = session
                    .item(*item)
                    .map_or(0, |word| session.ruleset().rules().points_for(word));
                Some(Notice::success("Great word!", format!("+{points} points")))
            }
            SessionEvent::Rejected { reason } => Some(match reason {
                Rejection::TooShort { .. } => Notice::error("Too short!", reason.to_string()),
                Rejection::NotInPool => Notice::error(
                    "Invalid word!",
                    "You can't make this word from the available letters.",
                ),
                Rejection::NotInList => {
                    Notice::error("Not in word list", "That's not one of the target words.")
                }
            }),
            SessionEvent::Completed(summary) if summary.correct_count() == summary.total_count() => {
                Some(Notice::success(
                    "Amazing!",
                    format!("All words found! Time bonus: {} points", summary.bonus()),
                ))
            }
            SessionEvent::Completed(summary) => Some(Notice::info(
                "Level finished",
                format!(
                    "You found {} of {} words. Score: {}",
                    summary.correct_count(),
                    summary.total_count(),
                    summary.score()
                ),
            )),
            SessionEvent::Expired(summary) => Some(time_up(summary, "words")),
            _ => None,
        }
    }

    fn refusal(error: &SessionError) -> Notice {
        match error {
            SessionError::AlreadyResolved { .. } => {
                Notice::error("Already found!", "You've already found this word.")
            }
            other => Notice::error("Not allowed", other.to_string()),
        }
    }
}
