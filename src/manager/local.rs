//! Local-only data manager.

use super::{AnalyticsView, ManagerResult, PomodoroView, TaskView, UserView};
use crate::config::ConfigStore;
use crate::db::{SessionType, SqliteDatabase, UserSettingsUpdate};

/// Data manager backed by the local record store only.
///
/// The single local user is created lazily on the first operation and its
/// id cached in config; every create/mutate leaves `needs_sync` set for
/// the push reconciler.
pub struct LocalStore {
    db: SqliteDatabase,
    config: ConfigStore,
}

impl LocalStore {
    pub fn new(db: SqliteDatabase, config: ConfigStore) -> Self {
        Self { db, config }
    }

    pub fn db(&self) -> &SqliteDatabase {
        &self.db
    }

    /// Resolve (creating if necessary) the single local user.
    pub async fn ensure_user(&self) -> ManagerResult<i64> {
        let mut settings = self.config.load();

        if let Some(id) = settings.local_user_id {
            if self.db.users().get(id).await.is_ok() {
                return Ok(id);
            }
            // Cached id points at a missing row (e.g. the database file
            // was recreated); fall through and re-resolve.
        }

        let username = default_username();
        let user = match self.db.users().get_by_username(&username).await? {
            Some(user) => user,
            None => self.db.users().create(&username, None).await?,
        };

        settings.local_user_id = Some(user.id);
        self.config.save(&settings)?;
        Ok(user.id)
    }

    pub async fn get_current_user(&self) -> ManagerResult<UserView> {
        let user_id = self.ensure_user().await?;
        Ok(self.db.users().get(user_id).await?.into())
    }

    pub async fn update_user_settings(
        &self,
        update: &UserSettingsUpdate,
    ) -> ManagerResult<UserView> {
        let user_id = self.ensure_user().await?;
        Ok(self.db.users().update_settings(user_id, update).await?.into())
    }

    pub async fn list_tasks(&self, include_completed: bool) -> ManagerResult<Vec<TaskView>> {
        let user_id = self.ensure_user().await?;
        let tasks = self.db.tasks().list(user_id, include_completed).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    pub async fn create_task(&self, description: &str) -> ManagerResult<TaskView> {
        let user_id = self.ensure_user().await?;
        Ok(self.db.tasks().create(user_id, description).await?.into())
    }

    pub async fn start_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        let user_id = self.ensure_user().await?;
        Ok(self.db.tasks().set_active(user_id, task_id).await?.into())
    }

    pub async fn complete_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        let user_id = self.ensure_user().await?;
        Ok(self.db.tasks().complete(user_id, task_id).await?.into())
    }

    pub async fn delete_task(&self, task_id: i64) -> ManagerResult<()> {
        let user_id = self.ensure_user().await?;
        self.db.tasks().delete(user_id, task_id).await?;
        Ok(())
    }

    pub async fn get_active_task(&self) -> ManagerResult<Option<TaskView>> {
        let user_id = self.ensure_user().await?;
        Ok(self.db.tasks().active_task(user_id).await?.map(Into::into))
    }

    pub async fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> ManagerResult<PomodoroView> {
        let user_id = self.ensure_user().await?;
        Ok(self
            .db
            .pomodoros()
            .create(user_id, task_id, session_type, duration_minutes)
            .await?
            .into())
    }

    pub async fn complete_pomodoro(&self, pomodoro_id: i64) -> ManagerResult<PomodoroView> {
        let user_id = self.ensure_user().await?;
        Ok(self
            .db
            .pomodoros()
            .complete(user_id, pomodoro_id)
            .await?
            .into())
    }

    /// Productivity summary computed over local records; "this week" is a
    /// rolling seven day window.
    pub async fn get_analytics(&self) -> ManagerResult<AnalyticsView> {
        let user_id = self.ensure_user().await?;
        let since = (chrono::Utc::now() - chrono::Duration::days(7))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        Ok(AnalyticsView {
            total_pomodoros: self.db.pomodoros().completed_count(user_id).await?,
            tasks_completed_this_week: self
                .db
                .tasks()
                .completed_count_since(user_id, &since)
                .await?,
            focus_time_this_week_minutes: self
                .db
                .pomodoros()
                .focus_minutes_since(user_id, &since)
                .await?,
        })
    }
}

fn default_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "local".to_string())
}
