//! Presentation-agnostic helpers for drawing a session.
//!
//! No colors, no layout: hosts map these values to whatever they render.

use play_core::model::TargetWord;

/// `m:ss`, e.g. `2:05`.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// How much of the time limit is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    /// More than half left.
    Plenty,
    /// More than a quarter left.
    Low,
    Critical,
}

impl TimeBand {
    /// Band for `remaining` out of `limit` seconds; `None` without a limit.
    #[must_use]
    pub fn of(remaining: Option<u32>, limit: Option<u32>) -> Option<Self> {
        let (remaining, limit) = (u64::from(remaining?), u64::from(limit?));
        if limit == 0 {
            return Some(TimeBand::Critical);
        }
        Some(if remaining * 100 > limit * 50 {
            TimeBand::Plenty
        } else if remaining * 100 > limit * 25 {
            TimeBand::Low
        } else {
            TimeBand::Critical
        })
    }
}

/// Quiz result band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    Good,
    KeepPracticing,
}

impl Verdict {
    #[must_use]
    pub fn for_percent(percent: u32) -> Self {
        match percent {
            80.. => Verdict::Excellent,
            60..=79 => Verdict::Good,
            _ => Verdict::KeepPracticing,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent!",
            Verdict::Good => "Good Job!",
            Verdict::KeepPracticing => "Keep Practicing!",
        }
    }
}

/// The first `count` target words, shown as a hint.
#[must_use]
pub fn word_hints(words: &[TargetWord], count: usize) -> Vec<&str> {
    words.iter().take(count).map(TargetWord::as_str).collect()
}

/// Position of the cursor through the content, in whole percent.
#[must_use]
pub fn position_percent(cursor: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (cursor.saturating_add(1)).min(total) * 100 / total;
    u32::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(3_599), "59:59");
    }

    #[test]
    fn time_bands_split_at_half_and_quarter() {
        assert_eq!(TimeBand::of(Some(91), Some(180)), Some(TimeBand::Plenty));
        assert_eq!(TimeBand::of(Some(90), Some(180)), Some(TimeBand::Low));
        assert_eq!(TimeBand::of(Some(46), Some(180)), Some(TimeBand::Low));
        assert_eq!(TimeBand::of(Some(45), Some(180)), Some(TimeBand::Critical));
        assert_eq!(TimeBand::of(None, None), None);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::for_percent(100), Verdict::Excellent);
        assert_eq!(Verdict::for_percent(80), Verdict::Excellent);
        assert_eq!(Verdict::for_percent(79), Verdict::Good);
        assert_eq!(Verdict::for_percent(60), Verdict::Good);
        assert_eq!(Verdict::for_percent(59).label(), "Keep Practicing!");
    }

    #[test]
    fn hints_take_leading_words() {
        let words: Vec<_> = ["KNOW", "EDGE", "GONE", "DOG"]
            .into_iter()
            .map(|w| TargetWord::new(w).unwrap())
            .collect();
        assert_eq!(word_hints(&words, 3), vec!["KNOW", "EDGE", "GONE"]);
        assert_eq!(word_hints(&words[..1], 3), vec!["KNOW"]);
    }

    #[test]
    fn position_counts_the_current_item() {
        assert_eq!(position_percent(0, 4), 25);
        assert_eq!(position_percent(3, 4), 100);
        assert_eq!(position_percent(0, 0), 0);
    }
}
