//! Focus session log - completed work sessions timed against a task
//!
//! Tracks completed sessions only, never running ones. Daily totals reset at
//! local midnight, so "today" queries go through the injected clock.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};

const SESSIONS_FILE: &str = "sessions.json";

/// One completed focus session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: String,
    pub task_id: String,
    pub task_name: String,
    pub duration_seconds: u64,
    pub completed_at: DateTime<Local>,
}

/// Persistent log of completed focus sessions.
pub struct SessionLog {
    base_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl SessionLog {
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
            .context("Failed to create session log directory")?;
        Ok(Self { base_dir, clock })
    }

    /// Record a completed session.
    pub fn add(
        &self,
        task_id: &str,
        task_name: &str,
        duration_seconds: u64,
    ) -> Result<FocusSession> {
        let session = FocusSession {
            id: Uuid::new_v4().to_string(),
            task_id: task_id.to_string(),
            task_name: task_name.to_string(),
            duration_seconds,
            completed_at: self.clock.now(),
        };
        let mut sessions = self.load()?;
        sessions.push(session.clone());
        self.save(&sessions)?;
        debug!(
            "Recorded {}s focus session for task {}",
            duration_seconds, task_id
        );
        Ok(session)
    }

    /// All recorded sessions, oldest first.
    pub fn sessions(&self) -> Result<Vec<FocusSession>> {
        self.load()
    }

    /// Total whole minutes focused today.
    pub fn minutes_today(&self) -> Result<u64> {
        let total_seconds: u64 = self
            .today_sessions()?
            .iter()
            .map(|s| s.duration_seconds)
            .sum();
        Ok(total_seconds / 60)
    }

    /// Count of sessions completed today.
    pub fn count_today(&self) -> Result<usize> {
        Ok(self.today_sessions()?.len())
    }

    /// Count of distinct tasks worked on today.
    pub fn unique_tasks_today(&self) -> Result<usize> {
        let tasks: HashSet<String> = self
            .today_sessions()?
            .into_iter()
            .map(|s| s.task_id)
            .collect();
        Ok(tasks.len())
    }

    fn today_sessions(&self) -> Result<Vec<FocusSession>> {
        let today = self.clock.today();
        Ok(self
            .load()?
            .into_iter()
            .filter(|s| s.completed_at.date_naive() == today)
            .collect())
    }

    // --- File I/O ---

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(SESSIONS_FILE)
    }

    fn load(&self) -> Result<Vec<FocusSession>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn save(&self, sessions: &[FocusSession]) -> Result<()> {
        let path = self.file_path();
        let json = serde_json::to_string_pretty(sessions)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
