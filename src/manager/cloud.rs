//! Cloud-only data manager.
//!
//! Pure proxy: every operation goes to the remote service and every
//! failure (including authentication) propagates to the caller. Local
//! sync bookkeeping is never touched.

use super::{AnalyticsView, ManagerResult, PomodoroView, TaskView, UserView};
use crate::db::{SessionType, UserSettingsUpdate};
use crate::remote::FlowApi;

pub struct CloudStore<A: FlowApi> {
    api: A,
}

impl<A: FlowApi> CloudStore<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn get_current_user(&self) -> ManagerResult<UserView> {
        Ok(self.api.get_current_user().await?.into())
    }

    pub async fn update_user_settings(
        &self,
        update: &UserSettingsUpdate,
    ) -> ManagerResult<UserView> {
        Ok(self.api.update_user_settings(&update.into()).await?.into())
    }

    pub async fn list_tasks(&self, include_completed: bool) -> ManagerResult<Vec<TaskView>> {
        let tasks = self.api.list_tasks(include_completed).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    pub async fn create_task(&self, description: &str) -> ManagerResult<TaskView> {
        Ok(self.api.create_task(description).await?.into())
    }

    pub async fn start_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        Ok(self.api.start_task(task_id).await?.into())
    }

    pub async fn complete_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        Ok(self.api.complete_task(task_id).await?.into())
    }

    pub async fn delete_task(&self, task_id: i64) -> ManagerResult<()> {
        self.api.delete_task(task_id).await?;
        Ok(())
    }

    pub async fn get_active_task(&self) -> ManagerResult<Option<TaskView>> {
        Ok(self.api.get_active_task().await?.map(Into::into))
    }

    pub async fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> ManagerResult<PomodoroView> {
        Ok(self
            .api
            .start_pomodoro(task_id, session_type, duration_minutes)
            .await?
            .into())
    }

    pub async fn complete_pomodoro(&self, pomodoro_id: i64) -> ManagerResult<PomodoroView> {
        Ok(self.api.complete_pomodoro(pomodoro_id).await?.into())
    }

    pub async fn get_analytics(&self) -> ManagerResult<AnalyticsView> {
        Ok(self.api.get_analytics().await?.into())
    }
}
