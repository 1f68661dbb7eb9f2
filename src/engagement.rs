//! Opened-days marker and the fire streak
//!
//! The shell marks each day the app is opened; the streak counts consecutive
//! marked days ending today. This measures engagement, not promise outcomes,
//! so it lives outside the promise store.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::promise::ledger::compute_streak;

const OPENED_DAYS_FILE: &str = "opened_days.json";

/// Persistent set of day keys on which the app was opened.
pub struct EngagementLog {
    base_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl EngagementLog {
    /// Create a log at the default data directory with the system clock.
    pub fn new() -> Result<Self> {
        Self::with_dir(crate::config::data_dir()?)
    }

    /// Create with a custom base directory.
    pub fn with_dir(base_dir: PathBuf) -> Result<Self> {
        Self::with_dir_and_clock(base_dir, Box::new(SystemClock))
    }

    /// Create with a custom base directory and clock.
    pub fn with_dir_and_clock(base_dir: PathBuf, clock: Box<dyn Clock>) -> Result<Self> {
        std::fs::create_dir_all(&base_dir)
            .context("Failed to create engagement log directory")?;
        Ok(Self { base_dir, clock })
    }

    /// Record that the app was opened today. Idempotent.
    pub fn mark_opened_today(&self) -> Result<()> {
        let today = self.clock.today();
        let mut days = self.load()?;
        if days.insert(today) {
            self.save(&days)?;
            debug!("Marked {} as opened", today);
        }
        Ok(())
    }

    /// All marked day keys.
    pub fn opened_days(&self) -> Result<HashSet<NaiveDate>> {
        self.load()
    }

    /// Consecutive-day streak ending today.
    pub fn streak(&self) -> Result<u32> {
        Ok(compute_streak(&self.load()?, self.clock.today()))
    }

    // --- File I/O ---

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(OPENED_DAYS_FILE)
    }

    fn load(&self) -> Result<HashSet<NaiveDate>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(HashSet::new());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let days: Vec<NaiveDate> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(days.into_iter().collect())
    }

    fn save(&self, days: &HashSet<NaiveDate>) -> Result<()> {
        let path = self.file_path();
        let mut sorted: Vec<NaiveDate> = days.iter().copied().collect();
        sorted.sort();
        let json = serde_json::to_string_pretty(&sorted)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
