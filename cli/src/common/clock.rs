//! # bakrs Time Source (`common::clock`)
//!
//! File: cli/src/common/clock.rs
//! Author: Christi Mahu
//!
//! Backup names embed the time they were taken. The time comes from a `Clock`
//! passed in by the caller, so naming is deterministic under test.
//!
use chrono::{Local, NaiveDateTime};

/// Format of the timestamp embedded in backup names, e.g. `20240318120000`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// The current time rendered with `TIMESTAMP_FORMAT`.
    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Reads the host's local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 18)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid date");
        assert_eq!(FixedClock(at).timestamp(), "20240318120000");
    }

    #[test]
    fn test_system_clock_timestamp_shape() {
        let stamp = SystemClock.timestamp();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
