//! Hybrid data manager: cloud when reachable, local otherwise.
//!
//! Each operation probes connectivity at call time. When the remote is
//! reachable the cloud gets exactly one attempt; any cloud error falls
//! back to exactly one local attempt and is never surfaced to the caller.
//! No retry loops on either side.

use tracing::warn;

use super::{AnalyticsView, CloudStore, LocalStore, ManagerResult, PomodoroView, TaskView, UserView};
use crate::db::{SessionType, UserSettingsUpdate};
use crate::remote::FlowApi;

pub struct HybridStore<A: FlowApi> {
    cloud: CloudStore<A>,
    local: LocalStore,
}

impl<A: FlowApi + Sync> HybridStore<A> {
    pub fn new(cloud: CloudStore<A>, local: LocalStore) -> Self {
        Self { cloud, local }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn cloud(&self) -> &CloudStore<A> {
        &self.cloud
    }

    async fn use_cloud(&self) -> bool {
        self.cloud.api().check_connectivity().await
    }

    pub async fn get_current_user(&self) -> ManagerResult<UserView> {
        if self.use_cloud().await {
            match self.cloud.get_current_user().await {
                Ok(user) => return Ok(user),
                Err(e) => warn!("cloud get_current_user failed, using local: {}", e),
            }
        }
        self.local.get_current_user().await
    }

    pub async fn update_user_settings(
        &self,
        update: &UserSettingsUpdate,
    ) -> ManagerResult<UserView> {
        if self.use_cloud().await {
            match self.cloud.update_user_settings(update).await {
                Ok(user) => return Ok(user),
                Err(e) => warn!("cloud update_user_settings failed, using local: {}", e),
            }
        }
        self.local.update_user_settings(update).await
    }

    pub async fn list_tasks(&self, include_completed: bool) -> ManagerResult<Vec<TaskView>> {
        if self.use_cloud().await {
            match self.cloud.list_tasks(include_completed).await {
                Ok(tasks) => return Ok(tasks),
                Err(e) => warn!("cloud list_tasks failed, using local: {}", e),
            }
        }
        self.local.list_tasks(include_completed).await
    }

    pub async fn create_task(&self, description: &str) -> ManagerResult<TaskView> {
        if self.use_cloud().await {
            match self.cloud.create_task(description).await {
                Ok(task) => return Ok(task),
                Err(e) => warn!("cloud create_task failed, using local: {}", e),
            }
        }
        self.local.create_task(description).await
    }

    pub async fn start_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        if self.use_cloud().await {
            match self.cloud.start_task(task_id).await {
                Ok(task) => return Ok(task),
                Err(e) => warn!("cloud start_task failed, using local: {}", e),
            }
        }
        self.local.start_task(task_id).await
    }

    pub async fn complete_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        if self.use_cloud().await {
            match self.cloud.complete_task(task_id).await {
                Ok(task) => return Ok(task),
                Err(e) => warn!("cloud complete_task failed, using local: {}", e),
            }
        }
        self.local.complete_task(task_id).await
    }

    pub async fn delete_task(&self, task_id: i64) -> ManagerResult<()> {
        if self.use_cloud().await {
            match self.cloud.delete_task(task_id).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!("cloud delete_task failed, using local: {}", e),
            }
        }
        self.local.delete_task(task_id).await
    }

    pub async fn get_active_task(&self) -> ManagerResult<Option<TaskView>> {
        if self.use_cloud().await {
            match self.cloud.get_active_task().await {
                Ok(task) => return Ok(task),
                Err(e) => warn!("cloud get_active_task failed, using local: {}", e),
            }
        }
        self.local.get_active_task().await
    }

    pub async fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> ManagerResult<PomodoroView> {
        if self.use_cloud().await {
            match self
                .cloud
                .start_pomodoro(task_id, session_type, duration_minutes)
                .await
            {
                Ok(pom) => return Ok(pom),
                Err(e) => warn!("cloud start_pomodoro failed, using local: {}", e),
            }
        }
        self.local
            .start_pomodoro(task_id, session_type, duration_minutes)
            .await
    }

    pub async fn complete_pomodoro(&self, pomodoro_id: i64) -> ManagerResult<PomodoroView> {
        if self.use_cloud().await {
            match self.cloud.complete_pomodoro(pomodoro_id).await {
                Ok(pom) => return Ok(pom),
                Err(e) => warn!("cloud complete_pomodoro failed, using local: {}", e),
            }
        }
        self.local.complete_pomodoro(pomodoro_id).await
    }

    pub async fn get_analytics(&self) -> ManagerResult<AnalyticsView> {
        if self.use_cloud().await {
            match self.cloud.get_analytics().await {
                Ok(summary) => return Ok(summary),
                Err(e) => warn!("cloud get_analytics failed, using local: {}", e),
            }
        }
        self.local.get_analytics().await
    }
}
