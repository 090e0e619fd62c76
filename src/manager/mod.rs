//! Data managers: one operation surface, three backends.
//!
//! The configured mode picks exactly one variant at command start:
//! - [`LocalStore`] works against the SQLite record store only.
//! - [`CloudStore`] proxies every operation to the remote service.
//! - [`HybridStore`] probes connectivity per call, tries the cloud once
//!   and falls back to local once on any cloud failure.
//!
//! Results are unified view records so local and remote data render the
//! same way in the CLI.

mod cloud;
mod error;
mod hybrid;
mod local;
mod views;

#[cfg(test)]
mod hybrid_test;

pub use cloud::CloudStore;
pub use error::{ManagerError, ManagerResult};
pub use hybrid::HybridStore;
pub use local::LocalStore;
pub use views::{AnalyticsView, PomodoroView, TaskView, UserView};

use crate::config::{ConfigStore, Mode, Settings};
use crate::db::{SessionType, SqliteDatabase, UserSettingsUpdate};
use crate::remote::{ApiClient, FlowApi};

/// The data manager resolved from configuration; a closed, tagged choice.
pub enum DataManager<A: FlowApi> {
    Local(LocalStore),
    Cloud(CloudStore<A>),
    Hybrid(HybridStore<A>),
}

/// Build the manager for the configured mode. Local storage is only
/// opened for the variants that use it.
pub async fn build_manager(
    settings: &Settings,
    store: &ConfigStore,
) -> ManagerResult<DataManager<ApiClient>> {
    let api = ApiClient::from_settings(settings);
    match settings.mode {
        Mode::Cloud => Ok(DataManager::Cloud(CloudStore::new(api))),
        Mode::Local => Ok(DataManager::Local(open_local_store(store).await?)),
        Mode::Hybrid => {
            let local = open_local_store(store).await?;
            Ok(DataManager::Hybrid(HybridStore::new(
                CloudStore::new(api),
                local,
            )))
        }
    }
}

async fn open_local_store(store: &ConfigStore) -> ManagerResult<LocalStore> {
    let db = SqliteDatabase::open(store.db_path()).await?;
    db.migrate().await?;
    Ok(LocalStore::new(db, store.clone()))
}

impl<A: FlowApi + Sync> DataManager<A> {
    pub async fn get_current_user(&self) -> ManagerResult<UserView> {
        match self {
            DataManager::Local(m) => m.get_current_user().await,
            DataManager::Cloud(m) => m.get_current_user().await,
            DataManager::Hybrid(m) => m.get_current_user().await,
        }
    }

    pub async fn update_user_settings(
        &self,
        update: &UserSettingsUpdate,
    ) -> ManagerResult<UserView> {
        match self {
            DataManager::Local(m) => m.update_user_settings(update).await,
            DataManager::Cloud(m) => m.update_user_settings(update).await,
            DataManager::Hybrid(m) => m.update_user_settings(update).await,
        }
    }

    pub async fn list_tasks(&self, include_completed: bool) -> ManagerResult<Vec<TaskView>> {
        match self {
            DataManager::Local(m) => m.list_tasks(include_completed).await,
            DataManager::Cloud(m) => m.list_tasks(include_completed).await,
            DataManager::Hybrid(m) => m.list_tasks(include_completed).await,
        }
    }

    pub async fn create_task(&self, description: &str) -> ManagerResult<TaskView> {
        match self {
            DataManager::Local(m) => m.create_task(description).await,
            DataManager::Cloud(m) => m.create_task(description).await,
            DataManager::Hybrid(m) => m.create_task(description).await,
        }
    }

    pub async fn start_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        match self {
            DataManager::Local(m) => m.start_task(task_id).await,
            DataManager::Cloud(m) => m.start_task(task_id).await,
            DataManager::Hybrid(m) => m.start_task(task_id).await,
        }
    }

    pub async fn complete_task(&self, task_id: i64) -> ManagerResult<TaskView> {
        match self {
            DataManager::Local(m) => m.complete_task(task_id).await,
            DataManager::Cloud(m) => m.complete_task(task_id).await,
            DataManager::Hybrid(m) => m.complete_task(task_id).await,
        }
    }

    pub async fn delete_task(&self, task_id: i64) -> ManagerResult<()> {
        match self {
            DataManager::Local(m) => m.delete_task(task_id).await,
            DataManager::Cloud(m) => m.delete_task(task_id).await,
            DataManager::Hybrid(m) => m.delete_task(task_id).await,
        }
    }

    pub async fn get_active_task(&self) -> ManagerResult<Option<TaskView>> {
        match self {
            DataManager::Local(m) => m.get_active_task().await,
            DataManager::Cloud(m) => m.get_active_task().await,
            DataManager::Hybrid(m) => m.get_active_task().await,
        }
    }

    pub async fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> ManagerResult<PomodoroView> {
        match self {
            DataManager::Local(m) => m.start_pomodoro(task_id, session_type, duration_minutes).await,
            DataManager::Cloud(m) => m.start_pomodoro(task_id, session_type, duration_minutes).await,
            DataManager::Hybrid(m) => m.start_pomodoro(task_id, session_type, duration_minutes).await,
        }
    }

    pub async fn complete_pomodoro(&self, pomodoro_id: i64) -> ManagerResult<PomodoroView> {
        match self {
            DataManager::Local(m) => m.complete_pomodoro(pomodoro_id).await,
            DataManager::Cloud(m) => m.complete_pomodoro(pomodoro_id).await,
            DataManager::Hybrid(m) => m.complete_pomodoro(pomodoro_id).await,
        }
    }

    pub async fn get_analytics(&self) -> ManagerResult<AnalyticsView> {
        match self {
            DataManager::Local(m) => m.get_analytics().await,
            DataManager::Cloud(m) => m.get_analytics().await,
            DataManager::Hybrid(m) => m.get_analytics().await,
        }
    }
}
