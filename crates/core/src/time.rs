use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

//
// ─── TIME LIMIT ────────────────────────────────────────────────────────────────
//

/// Upper bound on how long a session may run, in whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLimit {
    #[default]
    Unbounded,
    Seconds(u32),
}

impl TimeLimit {
    #[must_use]
    pub fn seconds(secs: u32) -> Self {
        Self::Seconds(secs)
    }

    #[must_use]
    pub fn minutes(minutes: u32) -> Self {
        Self::Seconds(minutes.saturating_mul(60))
    }

    /// Returns the limit in seconds, or `None` when unbounded.
    #[must_use]
    pub fn as_seconds(self) -> Option<u32> {
        match self {
            TimeLimit::Unbounded => None,
            TimeLimit::Seconds(secs) => Some(secs),
        }
    }

    /// Seconds left after `elapsed`, or `None` when unbounded.
    #[must_use]
    pub fn remaining(self, elapsed: u32) -> Option<u32> {
        self.as_seconds().map(|limit| limit.saturating_sub(elapsed))
    }

    /// True once `elapsed` has reached the limit.
    #[must_use]
    pub fn is_reached(self, elapsed: u32) -> bool {
        self.as_seconds().is_some_and(|limit| elapsed >= limit)
    }

    #[must_use]
    pub fn is_bounded(self) -> bool {
        matches!(self, TimeLimit::Seconds(_))
    }
}

//
// ─── CLOCK ─────────────────────────────────────────────────────────────────────
//

/// Wall-clock source for hosts that stamp finished sessions.
///
/// The session engine itself never reads the clock; it only counts ticks.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_saturates_at_zero() {
        let limit = TimeLimit::seconds(10);
        assert_eq!(limit.remaining(4), Some(6));
        assert_eq!(limit.remaining(15), Some(0));
        assert_eq!(TimeLimit::Unbounded.remaining(15), None);
    }

    #[test]
    fn limit_is_reached_at_boundary() {
        let limit = TimeLimit::minutes(1);
        assert!(!limit.is_reached(59));
        assert!(limit.is_reached(60));
        assert!(!TimeLimit::Unbounded.is_reached(u32::MAX));
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(30));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(30));

        let mut real = Clock::default_clock();
        real.advance(Duration::seconds(30));
        assert!(!real.is_fixed());
    }
}
