//! Injectable clock for all "today"/"now" determination
//!
//! Every date-sensitive decision (day keys, rollover, streaks) goes through a
//! `Clock` so tests can cross day boundaries deterministically instead of
//! reading the wall clock in scattered places.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveDate};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> DateTime<Local>;

    /// Today's local calendar date (the day key).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock pinned to a chosen instant, advanceable by hand.
///
/// Clones share the same underlying instant, so a test can hold one handle
/// and hand a clone to a store, then move both forward together.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl FixedClock {
    /// Create a clock pinned to the given instant.
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Create a clock pinned to noon on the given date.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .expect("noon is a valid time")
            .and_local_timezone(Local)
            .earliest()
            .unwrap_or_else(Local::now);
        Self::at(noon)
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().unwrap() = now;
    }

    /// Advance the clock by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap()
    }
}
