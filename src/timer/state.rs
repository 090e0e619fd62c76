//! On-disk timer state shared between the CLI and the daemon.
//!
//! Both processes derive the countdown from wall-clock time rather than
//! counting ticks, so a suspended laptop or a killed daemon never drifts
//! the timer. The state file is the single source of truth; whoever reads
//! it recomputes the remaining time from `start_time`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{TimerError, TimerResult};
use crate::db::SessionType;

/// Serialized countdown state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimerState {
    pub active: bool,
    pub paused: bool,
    /// Unix seconds at which the current (possibly resumed) countdown began.
    pub start_time: i64,
    /// Length of the current countdown. Reset to the frozen remainder on
    /// resume, so `start_time + duration_seconds` is always the deadline.
    pub duration_seconds: i64,
    /// Frozen remainder; only meaningful while `paused`.
    pub remaining_seconds: i64,
    pub session_type: SessionType,
    pub task_id: Option<i64>,
    pub task_description: Option<String>,
    /// Local or cloud id of the pomodoro record opened for this session,
    /// completed by the daemon when the countdown hits zero.
    pub pomodoro_id: Option<i64>,
    /// Unix seconds of the daemon's last tick, for debugging stalls.
    pub last_update: i64,
}

impl TimerState {
    pub fn begin(
        session_type: SessionType,
        duration_minutes: i64,
        task_id: Option<i64>,
        task_description: Option<String>,
        now: i64,
    ) -> Self {
        let duration_seconds = duration_minutes * 60;
        TimerState {
            active: true,
            paused: false,
            start_time: now,
            duration_seconds,
            remaining_seconds: duration_seconds,
            session_type,
            task_id,
            task_description,
            pomodoro_id: None,
            last_update: now,
        }
    }

    pub fn with_pomodoro_id(mut self, pomodoro_id: i64) -> Self {
        self.pomodoro_id = Some(pomodoro_id);
        self
    }

    /// Seconds left at `now`, clamped to zero. A paused timer reports its
    /// frozen remainder regardless of how much wall time passed.
    pub fn remaining_at(&self, now: i64) -> i64 {
        if !self.active {
            return 0;
        }
        if self.paused {
            return self.remaining_seconds.max(0);
        }
        (self.duration_seconds - (now - self.start_time)).max(0)
    }

    /// Freeze the countdown, keeping whatever is left at `now`.
    pub fn pause(&mut self, now: i64) {
        self.remaining_seconds = self.remaining_at(now);
        self.paused = true;
        self.last_update = now;
    }

    /// Restart the countdown from the frozen remainder.
    pub fn resume(&mut self, now: i64) {
        self.duration_seconds = self.remaining_seconds;
        self.start_time = now;
        self.paused = false;
        self.last_update = now;
    }
}

/// Render seconds as `MM:SS`.
pub fn format_mmss(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Current wall-clock time in unix seconds.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Reader/writer for the timer state JSON file.
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state, falling back to the inactive default when the file
    /// is missing. A corrupt file is removed so it cannot wedge the timer.
    pub fn load(&self) -> TimerState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return TimerState::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("corrupt timer state at {}: {}", self.path.display(), e);
                let _ = fs::remove_file(&self.path);
                TimerState::default()
            }
        }
    }

    pub fn save(&self, state: &TimerState) -> TimerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(state).map_err(|e| TimerError::State {
            message: e.to_string(),
        })?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) -> TimerResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
