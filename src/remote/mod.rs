//! Client for the FlowState cloud service.
//!
//! A thin JSON-over-HTTP wrapper; all state it carries is the base URL and
//! the bearer token taken from configuration at construction time.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod stub;

pub use client::ApiClient;
pub use error::{RemoteError, RemoteResult};
pub use types::{AnalyticsSummary, RemotePomodoro, RemoteTask, RemoteUser, UserSettingsPatch};

use crate::db::SessionType;

/// Operation surface of the cloud service.
///
/// The CLI always talks to [`ApiClient`]; tests substitute stub
/// implementations to exercise hybrid fallback and sync behavior.
pub trait FlowApi {
    /// Lightweight reachability probe with a bounded timeout. Never
    /// errors; unreachable simply reads as `false`.
    fn check_connectivity(&self) -> impl std::future::Future<Output = bool> + Send;

    fn send_magic_link(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = RemoteResult<()>> + Send;

    fn get_current_user(&self)
        -> impl std::future::Future<Output = RemoteResult<RemoteUser>> + Send;

    fn update_user_settings(
        &self,
        patch: &UserSettingsPatch,
    ) -> impl std::future::Future<Output = RemoteResult<RemoteUser>> + Send;

    fn list_tasks(
        &self,
        include_completed: bool,
    ) -> impl std::future::Future<Output = RemoteResult<Vec<RemoteTask>>> + Send;

    fn create_task(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = RemoteResult<RemoteTask>> + Send;

    fn start_task(
        &self,
        task_id: i64,
    ) -> impl std::future::Future<Output = RemoteResult<RemoteTask>> + Send;

    fn complete_task(
        &self,
        task_id: i64,
    ) -> impl std::future::Future<Output = RemoteResult<RemoteTask>> + Send;

    fn delete_task(
        &self,
        task_id: i64,
    ) -> impl std::future::Future<Output = RemoteResult<()>> + Send;

    fn get_active_task(
        &self,
    ) -> impl std::future::Future<Output = RemoteResult<Option<RemoteTask>>> + Send;

    fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> impl std::future::Future<Output = RemoteResult<RemotePomodoro>> + Send;

    fn complete_pomodoro(
        &self,
        pomodoro_id: i64,
    ) -> impl std::future::Future<Output = RemoteResult<RemotePomodoro>> + Send;

    fn get_analytics(
        &self,
    ) -> impl std::future::Future<Output = RemoteResult<AnalyticsSummary>> + Send;
}
