//! The session engine: one bounded, timed run of a quiz or game.

mod action;
mod attempt;
mod engine;
mod error;
mod event;
mod status;
mod summary;

pub use action::{Direction, SessionAction};
pub use attempt::Attempt;
pub use engine::{Session, Transition};
pub use error::SessionError;
pub use event::SessionEvent;
pub use status::{SessionKind, SessionStatus};
pub use summary::{SessionProgress, SessionSummary};
