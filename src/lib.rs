//! Mrror - Personal Accountability Core
//!
//! The engine behind a daily-promise journal:
//! - One promise per day: commit, optionally time focus sessions against it,
//!   then resolve it as kept or broken
//! - Day rollover that silently turns an unresolved promise into a broken one
//! - A proof ledger of kept/broken/pending counts and an engagement streak
//! - A daily check-in gate with a message to your next-day self
//!
//! The rendering shell is a separate collaborator; this crate owns only the
//! state machine, the persisted records, and the derived views.
//!
//! # Example
//!
//! ```ignore
//! use mrror::PromiseStore;
//!
//! fn main() -> Result<(), mrror::PromiseError> {
//!     let store = PromiseStore::new()?;
//!     store.rollover()?; // session start: correct stale promises first
//!     match store.today_promise()? {
//!         None => {
//!             store.create("I will finish the report", Some(30))?;
//!         }
//!         Some(p) if p.is_pending() => {
//!             store.complete()?;
//!         }
//!         Some(_) => {} // already resolved today
//!     }
//!     Ok(())
//! }
//! ```

// Core modules
pub mod clock;
pub mod config;
pub mod promise;

// Peripheral stores sharing the same persistence pattern
pub mod checkin;
pub mod engagement;
pub mod sessions;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};

pub use config::Config;

pub use promise::{
    compute_streak, summarize_last_n_days, DailyPromise, DaySummary, PromiseError, PromiseState,
    PromiseStore, AUTO_FAIL_REASON,
};

pub use checkin::{CheckIn, CheckInLog};
pub use engagement::EngagementLog;
pub use sessions::{FocusSession, SessionLog};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
