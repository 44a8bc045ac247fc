use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

/// Everything a host can ask of a session, for reducer-style dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction<S> {
    Begin,
    Tick,
    Submit(S),
    Advance(Direction),
    GoTo(usize),
    Pause,
    Resume,
    Complete,
    DismissMismatch,
}
