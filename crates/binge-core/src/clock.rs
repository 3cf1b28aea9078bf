//! Injected clock dependency
//!
//! Release evaluation and the missing-release-date default both depend on
//! "today". Wall-clock access is behind a trait so that every date-sensitive
//! code path can be tested deterministically.

use chrono::NaiveDate;

/// Source of the current date.
pub trait Clock {
    /// The current local date.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date, for tests and reproduction of
/// date-dependent behavior.
///
/// # Example
/// ```
/// use binge_core::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_current() {
        // Loose sanity check: the system clock reports a plausible year.
        let today = SystemClock.today();
        assert!(today.to_string().len() >= 10);
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let clock = FixedClock(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today(), date);
    }
}
