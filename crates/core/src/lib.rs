#![forbid(unsafe_code)]

pub mod model;
pub mod rules;
pub mod session;
pub mod time;

pub use time::{Clock, TimeLimit};

pub use rules::{MemoryMatch, Quiz, Ruleset, WordBuilder};
pub use session::{
    Session, SessionAction, SessionError, SessionEvent, SessionStatus, SessionSummary, Transition,
};
