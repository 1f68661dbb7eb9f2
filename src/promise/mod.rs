//! Daily promise lifecycle and ledger subsystem
//!
//! The store owns the persisted history and the state machine (create,
//! complete, fail, day rollover); the ledger derives read-only summaries
//! and streaks from it.

pub mod error;
pub mod ledger;
pub mod store;

pub use error::PromiseError;
pub use ledger::{compute_streak, summarize_last_n_days, DaySummary};
pub use store::{DailyPromise, PromiseState, PromiseStore, AUTO_FAIL_REASON};
