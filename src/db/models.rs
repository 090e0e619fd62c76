//! Domain models for the local record store.

use serde::{Deserialize, Serialize};

/// The single local account operations run against.
///
/// Exactly one user record is active per installation; it is created
/// lazily on the first local-mode operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    /// Stored but never processed locally; kept for parity with the cloud
    /// account record.
    pub password_hash: Option<String>,
    /// Cloud-assigned identifier once the account has been linked.
    pub remote_id: Option<i64>,
    pub pomo_duration: i64,
    pub short_break_duration: i64,
    pub long_break_duration: i64,
    pub notifications_enabled: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_synced_at: Option<String>,
}

/// Per-user duration/notification preferences, applied as one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSettingsUpdate {
    pub pomo_duration: Option<i64>,
    pub short_break_duration: Option<i64>,
    pub long_break_duration: Option<i64>,
    pub notifications_enabled: Option<bool>,
}

/// A work item owned by one user.
///
/// At most one task per user carries `is_active = true`; `is_active` and
/// `is_completed` are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    /// Cloud-assigned identifier; present once pushed.
    pub remote_id: Option<i64>,
    pub description: String,
    pub is_completed: bool,
    pub is_active: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub updated_at: String,
    pub last_synced_at: Option<String>,
    /// True until a successful push clears it.
    pub needs_sync: bool,
}

/// One recorded timer interval, optionally tied to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pomodoro {
    pub id: i64,
    pub user_id: i64,
    pub task_id: Option<i64>,
    pub remote_id: Option<i64>,
    pub session_type: SessionType,
    pub duration_minutes: i64,
    pub completed: bool,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub updated_at: String,
    pub last_synced_at: Option<String>,
    pub needs_sync: bool,
}

/// Classification of a timer interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionType::Focus => write!(f, "focus"),
            SessionType::ShortBreak => write!(f, "short_break"),
            SessionType::LongBreak => write!(f, "long_break"),
        }
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(SessionType::Focus),
            "short_break" => Ok(SessionType::ShortBreak),
            "long_break" => Ok(SessionType::LongBreak),
            _ => Err(format!("Invalid session type: {}", s)),
        }
    }
}

impl SessionType {
    /// Human label used in status lines and notifications.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Focus => "Focus",
            SessionType::ShortBreak => "Short break",
            SessionType::LongBreak => "Long break",
        }
    }
}

/// Outcome of pushing one locally-mutated record to the cloud, applied in
/// a batch after a sync loop finishes.
#[derive(Debug, Clone, Copy)]
pub struct SyncOutcome {
    pub local_id: i64,
    /// Newly assigned cloud id, when this push created the remote record.
    pub remote_id: Option<i64>,
}
