//! Time source abstraction.
//!
//! # Responsibility
//! - Provide "now" to the store so due-date logic can be driven in tests.
//!
//! # Invariants
//! - `now_local` is local wall-clock time; due dates are compared against it.
//! - `now_utc` is used for record timestamps only.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current time for store operations.
pub trait Clock {
    /// Current local wall-clock time.
    fn now_local(&self) -> NaiveDateTime;

    /// Current instant, used for `created_at` stamps.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now_local().date()
    }
}

/// Operating-system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
///
/// Clones share the same instant, so a test can keep a handle and move time
/// after handing the clock to a store.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.now.get()
    }

    // Fixed instants carry no zone; they are stamped as if local == UTC.
    fn now_utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.now.get())
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::{Duration, NaiveDate};

    #[test]
    fn fixed_clock_clones_share_time() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|date| date.and_hms_opt(23, 30, 0))
            .unwrap();
        let clock = FixedClock::new(start);
        let handle = clock.clone();

        handle.advance(Duration::hours(1));

        assert_eq!(clock.now_local(), start + Duration::hours(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }
}
