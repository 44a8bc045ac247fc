use play_core::TimeLimit;
use services::view::{TimeBand, format_clock};
use services::{Notice, Tone};

pub(crate) fn notice(notice: &Notice) {
    let marker = match notice.tone {
        Tone::Success => "+",
        Tone::Info => "*",
        Tone::Error => "!",
    };
    println!("[{marker}] {}: {}", notice.title, notice.description);
}

pub(crate) fn hint(message: &str) {
    println!("    {message}");
}

/// `⏱ 2:05 left` for bounded sessions, `⏱ 0:42` elapsed otherwise.
pub(crate) fn clock(elapsed: u32, limit: TimeLimit) -> String {
    match limit.remaining(elapsed) {
        Some(left) => {
            let band = match TimeBand::of(Some(left), limit.as_seconds()) {
                Some(TimeBand::Plenty) | None => "",
                Some(TimeBand::Low) => " (hurry)",
                Some(TimeBand::Critical) => " (almost out!)",
            };
            format!("⏱ {} left{band}", format_clock(left))
        }
        None => format!("⏱ {}", format_clock(elapsed)),
    }
}

pub(crate) fn rule() {
    println!("{}", "─".repeat(48));
}
