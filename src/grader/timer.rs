//! Assignment countdown

use serde::Serialize;

use crate::utils::format_clock;

/// Countdown from an assignment's time limit, floored at zero.
///
/// Purely informational: it never stops or gates grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    limit_seconds: u64,
    remaining_seconds: u64,
}

impl Countdown {
    /// Start a countdown of `time_limit_minutes`
    pub fn new(time_limit_minutes: u32) -> Self {
        let limit_seconds = u64::from(time_limit_minutes) * 60;
        Self {
            limit_seconds,
            remaining_seconds: limit_seconds,
        }
    }

    /// Advance by one second
    pub fn tick(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    /// Countdown state after `elapsed_seconds` from the start
    pub fn remaining_after(&self, elapsed_seconds: u64) -> Self {
        Self {
            limit_seconds: self.limit_seconds,
            remaining_seconds: self.limit_seconds.saturating_sub(elapsed_seconds),
        }
    }

    pub fn limit_seconds(&self) -> u64 {
        self.limit_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Remaining time as `M:SS`
    pub fn format(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Snapshot for the timer endpoint
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            time_limit_seconds: self.limit_seconds,
            remaining_seconds: self.remaining_seconds,
            display: self.format(),
            expired: self.is_expired(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub time_limit_seconds: u64,
    pub remaining_seconds: u64,
    pub display: String,
    pub expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_limit() {
        let countdown = Countdown::new(30);
        assert_eq!(countdown.remaining_seconds(), 1800);
        assert_eq!(countdown.format(), "30:00");
        assert!(!countdown.is_expired());
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut countdown = Countdown::new(0);
        countdown.tick();
        assert_eq!(countdown.remaining_seconds(), 0);
        assert!(countdown.is_expired());

        let mut countdown = Countdown::new(1);
        countdown.tick();
        assert_eq!(countdown.format(), "0:59");
    }

    #[test]
    fn test_remaining_after() {
        let countdown = Countdown::new(30);
        assert_eq!(countdown.remaining_after(1795).format(), "0:05");
        assert!(countdown.remaining_after(5000).is_expired());
        assert_eq!(countdown.remaining_after(5000).remaining_seconds(), 0);
    }

    #[test]
    fn test_snapshot() {
        let snapshot = Countdown::new(20).remaining_after(61).snapshot();
        assert_eq!(
            snapshot,
            TimerSnapshot {
                time_limit_seconds: 1200,
                remaining_seconds: 1139,
                display: "18:59".to_string(),
                expired: false,
            }
        );
    }
}
