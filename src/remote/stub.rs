//! Configurable in-memory FlowApi stub shared by manager and sync tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{
    AnalyticsSummary, FlowApi, RemoteError, RemotePomodoro, RemoteResult, RemoteTask, RemoteUser,
    UserSettingsPatch,
};
use crate::db::SessionType;

/// Stub remote service.
///
/// `online` controls the connectivity probe, `fail_requests` makes every
/// operation error, and `fail_create_task_at` fails only the n-th
/// `create_task` call (1-based). Call counters let tests assert how many
/// attempts reached the "cloud".
pub(crate) struct StubApi {
    pub online: AtomicBool,
    pub fail_requests: AtomicBool,
    pub fail_create_task_at: Option<usize>,
    pub connectivity_checks: AtomicUsize,
    pub create_task_calls: AtomicUsize,
    pub start_pomodoro_calls: AtomicUsize,
    pub complete_pomodoro_calls: AtomicUsize,
}

impl StubApi {
    pub fn online() -> Self {
        Self::with(true, false)
    }

    pub fn offline() -> Self {
        Self::with(false, false)
    }

    /// Reachable but every request fails server-side.
    pub fn failing() -> Self {
        Self::with(true, true)
    }

    fn with(online: bool, fail_requests: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            fail_requests: AtomicBool::new(fail_requests),
            fail_create_task_at: None,
            connectivity_checks: AtomicUsize::new(0),
            create_task_calls: AtomicUsize::new(0),
            start_pomodoro_calls: AtomicUsize::new(0),
            complete_pomodoro_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_create_at(n: usize) -> Self {
        let mut stub = Self::online();
        stub.fail_create_task_at = Some(n);
        stub
    }

    fn check(&self) -> RemoteResult<()> {
        if self.fail_requests.load(Ordering::SeqCst) {
            Err(RemoteError::Api {
                status: 500,
                message: "stub failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl FlowApi for StubApi {
    async fn check_connectivity(&self) -> bool {
        self.connectivity_checks.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }

    async fn send_magic_link(&self, _email: &str) -> RemoteResult<()> {
        self.check()
    }

    async fn get_current_user(&self) -> RemoteResult<RemoteUser> {
        self.check()?;
        Ok(RemoteUser {
            id: 9000,
            username: "cloud-user".to_string(),
            email: Some("cloud@example.com".to_string()),
            pomo_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            notifications_enabled: true,
        })
    }

    async fn update_user_settings(&self, _patch: &UserSettingsPatch) -> RemoteResult<RemoteUser> {
        self.check()?;
        self.get_current_user().await
    }

    async fn list_tasks(&self, _include_completed: bool) -> RemoteResult<Vec<RemoteTask>> {
        self.check()?;
        Ok(vec![RemoteTask {
            id: 8001,
            description: "cloud task".to_string(),
            is_completed: false,
            is_active: false,
            created_at: None,
            completed_at: None,
        }])
    }

    async fn create_task(&self, description: &str) -> RemoteResult<RemoteTask> {
        let call = self.create_task_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.check()?;
        if self.fail_create_task_at == Some(call) {
            return Err(RemoteError::Api {
                status: 500,
                message: "stub create failure".to_string(),
            });
        }
        Ok(RemoteTask {
            id: 8000 + call as i64,
            description: description.to_string(),
            is_completed: false,
            is_active: false,
            created_at: None,
            completed_at: None,
        })
    }

    async fn start_task(&self, task_id: i64) -> RemoteResult<RemoteTask> {
        self.check()?;
        Ok(RemoteTask {
            id: task_id,
            description: "cloud task".to_string(),
            is_completed: false,
            is_active: true,
            created_at: None,
            completed_at: None,
        })
    }

    async fn complete_task(&self, task_id: i64) -> RemoteResult<RemoteTask> {
        self.check()?;
        Ok(RemoteTask {
            id: task_id,
            description: "cloud task".to_string(),
            is_completed: true,
            is_active: false,
            created_at: None,
            completed_at: None,
        })
    }

    async fn delete_task(&self, _task_id: i64) -> RemoteResult<()> {
        self.check()
    }

    async fn get_active_task(&self) -> RemoteResult<Option<RemoteTask>> {
        self.check()?;
        Ok(None)
    }

    async fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> RemoteResult<RemotePomodoro> {
        let call = self.start_pomodoro_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.check()?;
        Ok(RemotePomodoro {
            id: 7000 + call as i64,
            task_id,
            session_type,
            duration_minutes,
            completed: false,
            started_at: None,
            completed_at: None,
        })
    }

    async fn complete_pomodoro(&self, pomodoro_id: i64) -> RemoteResult<RemotePomodoro> {
        self.complete_pomodoro_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(RemotePomodoro {
            id: pomodoro_id,
            task_id: None,
            session_type: SessionType::Focus,
            duration_minutes: 25,
            completed: true,
            started_at: None,
            completed_at: None,
        })
    }

    async fn get_analytics(&self) -> RemoteResult<AnalyticsSummary> {
        self.check()?;
        Ok(AnalyticsSummary {
            total_pomodoros: 12,
            tasks_completed_this_week: 3,
            focus_time_this_week_minutes: 300,
        })
    }
}
