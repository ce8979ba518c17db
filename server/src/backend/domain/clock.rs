//! Source of "now" and "today" for the ride views.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

pub trait Clock: Send + Sync {
    /// Current local wall-clock time, truncated to whole seconds.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let at = NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(7, 45, 0)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
    }

    #[test]
    fn test_local_clock_has_whole_seconds() {
        assert_eq!(LocalClock.now().nanosecond(), 0);
    }
}
