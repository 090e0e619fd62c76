//! Unified records returned by data manager operations.
//!
//! Local rows and remote wire records collapse into these so callers
//! render them identically regardless of backend.

use serde::Serialize;

use crate::db::{Pomodoro, SessionType, Task, User};
use crate::remote::{AnalyticsSummary, RemotePomodoro, RemoteTask, RemoteUser};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub pomo_duration: i64,
    pub short_break_duration: i64,
    pub long_break_duration: i64,
    pub notifications_enabled: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            pomo_duration: u.pomo_duration,
            short_break_duration: u.short_break_duration,
            long_break_duration: u.long_break_duration,
            notifications_enabled: u.notifications_enabled,
        }
    }
}

impl From<RemoteUser> for UserView {
    fn from(u: RemoteUser) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            pomo_duration: u.pomo_duration,
            short_break_duration: u.short_break_duration,
            long_break_duration: u.long_break_duration,
            notifications_enabled: u.notifications_enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub description: String,
    pub is_completed: bool,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
}

impl From<Task> for TaskView {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            description: t.description,
            is_completed: t.is_completed,
            is_active: t.is_active,
            created_at: Some(t.created_at),
            completed_at: t.completed_at,
        }
    }
}

impl From<RemoteTask> for TaskView {
    fn from(t: RemoteTask) -> Self {
        Self {
            id: t.id,
            description: t.description,
            is_completed: t.is_completed,
            is_active: t.is_active,
            created_at: t.created_at,
            completed_at: t.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PomodoroView {
    pub id: i64,
    pub task_id: Option<i64>,
    pub session_type: SessionType,
    pub duration_minutes: i64,
    pub completed: bool,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

impl From<Pomodoro> for PomodoroView {
    fn from(p: Pomodoro) -> Self {
        Self {
            id: p.id,
            task_id: p.task_id,
            session_type: p.session_type,
            duration_minutes: p.duration_minutes,
            completed: p.completed,
            started_at: Some(p.started_at),
            completed_at: p.completed_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsView {
    pub total_pomodoros: i64,
    pub tasks_completed_this_week: i64,
    pub focus_time_this_week_minutes: i64,
}

impl From<AnalyticsSummary> for AnalyticsView {
    fn from(a: AnalyticsSummary) -> Self {
        Self {
            total_pomodoros: a.total_pomodoros,
            tasks_completed_this_week: a.tasks_completed_this_week,
            focus_time_this_week_minutes: a.focus_time_this_week_minutes,
        }
    }
}

impl From<RemotePomodoro> for PomodoroView {
    fn from(p: RemotePomodoro) -> Self {
        Self {
            id: p.id,
            task_id: p.task_id,
            session_type: p.session_type,
            duration_minutes: p.duration_minutes,
            completed: p.completed,
            started_at: p.started_at,
            completed_at: p.completed_at,
        }
    }
}
