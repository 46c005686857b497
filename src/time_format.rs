//! Relative time formatting ("3 hrs ago") over an injectable clock.

use crate::reducer::UNKNOWN;
use chrono::Utc;

/// Source of "now" as unix epoch seconds.
pub trait Clock: Send + Sync {
    fn now_epoch(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch(&self) -> i64 {
        self.0
    }
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats `epoch` relative to `now`.
///
/// Absent or zero epochs yield the sentinel. Future timestamps clamp to zero
/// elapsed seconds, so the result is never negative.
pub fn format_ago(now: i64, epoch: Option<i64>) -> String {
    let epoch = match epoch {
        Some(e) if e != 0 => e,
        _ => return UNKNOWN.to_string(),
    };

    let elapsed = now.saturating_sub(epoch).max(0);

    let (count, unit) = if elapsed >= DAY {
        (elapsed / DAY, "day")
    } else if elapsed >= HOUR {
        (elapsed / HOUR, "hr")
    } else if elapsed >= MINUTE {
        (elapsed / MINUTE, "min")
    } else {
        (elapsed, "sec")
    };

    format!("{} {}{} ago", count, unit, plural_suffix(count))
}

/// "s" for counts above one.
pub fn plural_suffix(count: i64) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

/// Convenience wrapper reading "now" from a [`Clock`].
pub fn format_ago_with(clock: &dyn Clock, epoch: Option<i64>) -> String {
    format_ago(clock.now_epoch(), epoch)
}
