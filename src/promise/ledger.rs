//! Ledger Aggregator - read-only views over promise history
//!
//! Pure folds, no side effects: per-date kept/broken/pending counts over a
//! trailing window, and the consecutive-day engagement streak. The display
//! layer re-queries these after every mutation.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::store::{DailyPromise, PromiseState};

/// Per-date outcome counts for the proof ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub kept: u32,
    pub broken: u32,
    pub pending: u32,
}

impl DaySummary {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            kept: 0,
            broken: 0,
            pending: 0,
        }
    }
}

/// Fold promise history into the `days` calendar dates ending at `reference`.
///
/// Counts accumulate per bucket, so several resolved promises sharing a date
/// all land in that date's row. Promises outside the window are ignored.
/// Output is ordered most recent first.
pub fn summarize_last_n_days(
    promises: &[DailyPromise],
    days: usize,
    reference: NaiveDate,
) -> Vec<DaySummary> {
    let mut summaries: Vec<DaySummary> = (0..days)
        .filter_map(|back| reference.checked_sub_days(Days::new(back as u64)))
        .map(DaySummary::empty)
        .collect();

    for promise in promises {
        if let Some(entry) = summaries.iter_mut().find(|s| s.date == promise.date) {
            match promise.state {
                PromiseState::Completed => entry.kept += 1,
                PromiseState::Failed => entry.broken += 1,
                PromiseState::Pending => entry.pending += 1,
            }
        }
    }
    summaries
}

/// Consecutive days ending at `reference` that are present in `opened`.
///
/// Walks backward one day at a time; the first missing day stops the count.
/// An unmarked `reference` itself yields 0.
pub fn compute_streak(opened: &HashSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = reference;
    while opened.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
