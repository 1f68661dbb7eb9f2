//! Promise Store - the daily promise lifecycle and its persisted history
//!
//! One JSON file holds every promise ever made, newest first, mirroring the
//! original single-key collection. Every mutation is a whole-file
//! read-modify-write: either the full updated history lands on disk or the
//! prior state is retained and the caller gets a `Storage` error.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::error::PromiseError;
use super::ledger::{summarize_last_n_days, DaySummary};
use crate::clock::{Clock, SystemClock};

/// Reason stamped on promises auto-failed by the day rollover.
pub const AUTO_FAIL_REASON: &str = "Unresolved at end of day";

const PROMISES_FILE: &str = "promises.json";

/// Lifecycle state of a daily promise.
///
/// `Pending` is the only state with outbound transitions; `Completed` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromiseState {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for PromiseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromiseState::Pending => write!(f, "pending"),
            PromiseState::Completed => write!(f, "completed"),
            PromiseState::Failed => write!(f, "failed"),
        }
    }
}

/// One day's committed statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPromise {
    /// Local calendar day the promise belongs to.
    pub date: NaiveDate,
    /// The commitment text ("I will ...").
    pub promise: String,
    /// User's effort estimate, if they gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    pub state: PromiseState,
    /// Required for user-initiated failures; the fixed sentinel for
    /// rollover auto-failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Local>,
    /// Stamped exactly once, when the promise leaves `Pending`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Local>>,
}

impl DailyPromise {
    /// Whether this promise is still awaiting resolution.
    pub fn is_pending(&self) -> bool {
        self.state == PromiseState::Pending
    }
}

/// Persistent promise store backed by a single JSON history file.
///
/// At most one `Pending` promise may exist per date; resolved promises
/// accumulate (a user may make a new promise after resolving the previous
/// one on the same day). Records are never deleted.
pub struct PromiseStore {
    base_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl PromiseStore {
    /// Create a store at the default data directory with the system clock.
    pub fn new() -> Result<Self, PromiseError> {
        let base_dir = crate::config::data_dir()
            .map_err(|e| PromiseError::Storage(e.to_string()))?;
        Self::with_dir(base_dir)
    }

    /// Create with a custom base directory.
    pub fn with_dir(base_dir: PathBuf) -> Result<Self, PromiseError> {
        Self::with_dir_and_clock(base_dir, Box::new(SystemClock))
    }

    /// Create with a custom base directory and clock.
    pub fn with_dir_and_clock(
        base_dir: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, PromiseError> {
        std::fs::create_dir_all(&base_dir)
            .map_err(|e| storage_error("create", &base_dir, e))?;
        Ok(Self { base_dir, clock })
    }

    /// Commit to a new promise for today.
    ///
    /// Rejects whitespace-only text, and rejects creation while a pending
    /// promise for today exists: the caller must resolve it (or let it roll
    /// over) first.
    pub fn create(
        &self,
        text: &str,
        estimated_minutes: Option<u32>,
    ) -> Result<DailyPromise, PromiseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PromiseError::EmptyPromise);
        }

        let today = self.clock.today();
        let mut promises = self.load()?;
        if promises.iter().any(|p| p.date == today && p.is_pending()) {
            return Err(PromiseError::PromiseAlreadyActive);
        }

        let record = DailyPromise {
            date: today,
            promise: text.to_string(),
            estimated_minutes,
            state: PromiseState::Pending,
            failure_reason: None,
            created_at: self.clock.now(),
            completed_at: None,
        };
        promises.insert(0, record.clone());
        self.save(&promises)?;
        info!("Created promise for {}: {}", today, record.promise);
        Ok(record)
    }

    /// Resolve today's pending promise as kept.
    ///
    /// Single-shot: once resolved, a second call finds no pending promise
    /// and returns `NoPendingPromise`.
    pub fn complete(&self) -> Result<DailyPromise, PromiseError> {
        self.resolve(PromiseState::Completed, None)
    }

    /// Resolve today's pending promise as broken, with a required reason.
    pub fn fail(&self, reason: &str) -> Result<DailyPromise, PromiseError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(PromiseError::EmptyReason);
        }
        self.resolve(PromiseState::Failed, Some(reason.to_string()))
    }

    fn resolve(
        &self,
        state: PromiseState,
        reason: Option<String>,
    ) -> Result<DailyPromise, PromiseError> {
        let today = self.clock.today();
        let now = self.clock.now();
        let mut promises = self.load()?;
        let slot = promises
            .iter_mut()
            .find(|p| p.date == today && p.is_pending())
            .ok_or(PromiseError::NoPendingPromise)?;
        slot.state = state;
        slot.failure_reason = reason;
        slot.completed_at = Some(now);
        let resolved = slot.clone();
        self.save(&promises)?;
        info!("Promise for {} resolved as {}", today, resolved.state);
        Ok(resolved)
    }

    /// Most recently created promise for a date, if any.
    ///
    /// History may hold several resolved promises per date; the newest by
    /// `created_at` is the canonical single-record answer.
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Option<DailyPromise>, PromiseError> {
        let promises = self.load()?;
        Ok(promises
            .into_iter()
            .filter(|p| p.date == date)
            .max_by_key(|p| p.created_at))
    }

    /// Today's canonical promise.
    pub fn today_promise(&self) -> Result<Option<DailyPromise>, PromiseError> {
        self.get_by_date(self.clock.today())
    }

    /// Auto-fail every pending promise dated before today.
    ///
    /// Must run at session start, before today's promise is read: a stale
    /// pending promise from yesterday would otherwise block today's creation
    /// and misrepresent history. Returns the number of promises corrected.
    pub fn rollover(&self) -> Result<usize, PromiseError> {
        self.rollover_at(self.clock.today())
    }

    /// Rollover against an explicit reference date.
    ///
    /// Idempotent: an already-failed promise is untouched, so a second run
    /// changes nothing and re-stamps nothing.
    pub fn rollover_at(&self, reference: NaiveDate) -> Result<usize, PromiseError> {
        let now = self.clock.now();
        let mut promises = self.load()?;
        let mut corrected = 0;
        for p in promises.iter_mut() {
            if p.is_pending() && p.date < reference {
                p.state = PromiseState::Failed;
                p.failure_reason = Some(AUTO_FAIL_REASON.to_string());
                p.completed_at = Some(now);
                corrected += 1;
                warn!("Auto-failed unresolved promise from {}", p.date);
            }
        }
        if corrected > 0 {
            self.save(&promises)?;
        }
        Ok(corrected)
    }

    /// Full promise history, newest first.
    pub fn history(&self) -> Result<Vec<DailyPromise>, PromiseError> {
        self.load()
    }

    /// Ledger summary for the `days` dates ending today.
    pub fn last_n_days_summary(&self, days: usize) -> Result<Vec<DaySummary>, PromiseError> {
        let promises = self.load()?;
        Ok(summarize_last_n_days(&promises, days, self.clock.today()))
    }

    /// Base directory holding the history file.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    // --- File I/O ---

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(PROMISES_FILE)
    }

    fn load(&self) -> Result<Vec<DailyPromise>, PromiseError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| storage_error("read", &path, e))?;
        serde_json::from_str(&raw).map_err(|e| storage_error("parse", &path, e))
    }

    fn save(&self, promises: &[DailyPromise]) -> Result<(), PromiseError> {
        let path = self.file_path();
        let json = serde_json::to_string_pretty(promises)
            .map_err(|e| storage_error("serialize", &path, e))?;
        std::fs::write(&path, json).map_err(|e| storage_error("write", &path, e))
    }
}

fn storage_error(op: &str, path: &Path, err: impl std::fmt::Display) -> PromiseError {
    error!("Failed to {} {}: {}", op, path.display(), err);
    PromiseError::Storage(format!("failed to {} {}: {}", op, path.display(), err))
}
