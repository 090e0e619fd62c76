//! Reqwest-backed implementation of the cloud API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{
    AnalyticsSummary, FlowApi, RemoteError, RemotePomodoro, RemoteResult, RemoteTask, RemoteUser,
    UserSettingsPatch,
};
use crate::config::Settings;
use crate::db::SessionType;

/// Timeout for the hybrid-mode reachability probe, bounded so mode
/// selection never hangs.
const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP client for the FlowState cloud service.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client: Client::new(),
        }
    }

    /// Client configured from persisted settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.auth_token.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a response to JSON, turning 401 into the distinct
    /// authentication-required condition.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(RemoteError::AuthRequired);
        }
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| RemoteError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(RemoteError::Api { status, message })
        }
    }

    async fn handle_empty(response: Response) -> RemoteResult<()> {
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(RemoteError::AuthRequired);
        }
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(RemoteError::Api { status, message })
        }
    }
}

impl FlowApi for ApiClient {
    async fn check_connectivity(&self) -> bool {
        self.client
            .get(&self.base_url)
            .timeout(CONNECTIVITY_TIMEOUT)
            .send()
            .await
            .is_ok()
    }

    async fn send_magic_link(&self, email: &str) -> RemoteResult<()> {
        let response = self
            .request(Method::POST, "/auth/magic-link")
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    async fn get_current_user(&self) -> RemoteResult<RemoteUser> {
        let response = self.request(Method::GET, "/users/me").send().await?;
        Self::handle_response(response).await
    }

    async fn update_user_settings(&self, patch: &UserSettingsPatch) -> RemoteResult<RemoteUser> {
        let response = self
            .request(Method::PUT, "/users/me")
            .json(patch)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn list_tasks(&self, include_completed: bool) -> RemoteResult<Vec<RemoteTask>> {
        let response = self
            .request(Method::GET, "/tasks")
            .query(&[("include_completed", include_completed)])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create_task(&self, description: &str) -> RemoteResult<RemoteTask> {
        let response = self
            .request(Method::POST, "/tasks")
            .json(&json!({ "description": description }))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn start_task(&self, task_id: i64) -> RemoteResult<RemoteTask> {
        let response = self
            .request(Method::PUT, &format!("/tasks/{}/start", task_id))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn complete_task(&self, task_id: i64) -> RemoteResult<RemoteTask> {
        let response = self
            .request(Method::PUT, &format!("/tasks/{}/complete", task_id))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete_task(&self, task_id: i64) -> RemoteResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{}", task_id))
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    async fn get_active_task(&self) -> RemoteResult<Option<RemoteTask>> {
        let response = self.request(Method::GET, "/tasks/active").send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::handle_response(response).await.map(Some)
    }

    async fn start_pomodoro(
        &self,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> RemoteResult<RemotePomodoro> {
        let response = self
            .request(Method::POST, "/pomodoros")
            .json(&json!({
                "task_id": task_id,
                "session_type": session_type,
                "duration_minutes": duration_minutes,
            }))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn complete_pomodoro(&self, pomodoro_id: i64) -> RemoteResult<RemotePomodoro> {
        let response = self
            .request(Method::PUT, &format!("/pomodoros/{}/complete", pomodoro_id))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn get_analytics(&self) -> RemoteResult<AnalyticsSummary> {
        let response = self
            .request(Method::GET, "/analytics/summary")
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
