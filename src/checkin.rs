//! Daily check-in - the morning gate before entering the dashboard
//!
//! One record per date: an honest yes/no ("did you act like the person you
//! want to become?") plus a message the user writes to their next-day self.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::{Clock, SystemClock};

const CHECKINS_FILE: &str = "checkins.json";

/// One day's check-in answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub date: NaiveDate,
    pub kept: bool,
    /// Message to the next-day self; shown tomorrow.
    pub message: String,
    pub created_at: DateTime<Local>,
}

/// Persistent check-in history, one entry per date.
pub struct CheckInLog {
    base_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl CheckInLog {
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
            .context("Failed to create check-in log directory")?;
        Ok(Self { base_dir, clock })
    }

    /// Submit today's check-in. Rejects a second submission for the same day.
    pub fn submit(&self, kept: bool, message: &str) -> Result<CheckIn> {
        let today = self.clock.today();
        let mut checkins = self.load()?;
        if checkins.iter().any(|c| c.date == today) {
            bail!("check-in for {} already submitted", today);
        }

        let record = CheckIn {
            date: today,
            kept,
            message: message.trim().to_string(),
            created_at: self.clock.now(),
        };
        checkins.push(record.clone());
        self.save(&checkins)?;
        info!("Recorded check-in for {} (kept: {})", today, kept);
        Ok(record)
    }

    /// Whether today's check-in has been submitted.
    pub fn is_complete_today(&self) -> Result<bool> {
        let today = self.clock.today();
        Ok(self.load()?.iter().any(|c| c.date == today))
    }

    /// The message the user left for themselves yesterday, if any.
    pub fn yesterday_message(&self) -> Result<Option<String>> {
        let yesterday = self.clock.today().pred_opt();
        let Some(yesterday) = yesterday else {
            return Ok(None);
        };
        Ok(self
            .load()?
            .into_iter()
            .find(|c| c.date == yesterday)
            .map(|c| c.message)
            .filter(|m| !m.is_empty()))
    }

    /// Full check-in history, oldest first.
    pub fn history(&self) -> Result<Vec<CheckIn>> {
        self.load()
    }

    // --- File I/O ---

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(CHECKINS_FILE)
    }

    fn load(&self) -> Result<Vec<CheckIn>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn save(&self, checkins: &[CheckIn]) -> Result<()> {
        let path = self.file_path();
        let json = serde_json::to_string_pretty(checkins)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
