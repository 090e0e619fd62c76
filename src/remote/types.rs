//! Wire records returned by the cloud service.

use serde::{Deserialize, Serialize};

use crate::db::{SessionType, UserSettingsUpdate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    #[serde(default = "default_pomo")]
    pub pomo_duration: i64,
    #[serde(default = "default_short_break")]
    pub short_break_duration: i64,
    #[serde(default = "default_long_break")]
    pub long_break_duration: i64,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTask {
    pub id: i64,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePomodoro {
    pub id: i64,
    pub task_id: Option<i64>,
    pub session_type: SessionType,
    pub duration_minutes: i64,
    #[serde(default)]
    pub completed: bool,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_pomodoros: i64,
    pub tasks_completed_this_week: i64,
    pub focus_time_this_week_minutes: i64,
}

/// Partial settings update sent to PUT /users/me.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pomo_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_break_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_break_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}

impl From<&UserSettingsUpdate> for UserSettingsPatch {
    fn from(u: &UserSettingsUpdate) -> Self {
        Self {
            pomo_duration: u.pomo_duration,
            short_break_duration: u.short_break_duration,
            long_break_duration: u.long_break_duration,
            notifications_enabled: u.notifications_enabled,
        }
    }
}

fn default_pomo() -> i64 {
    25
}

fn default_short_break() -> i64 {
    5
}

fn default_long_break() -> i64 {
    15
}

fn default_true() -> bool {
    true
}
