use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Mode, Settings};
use crate::db::{DbError, SqliteDatabase, SyncOutcome};
use crate::remote::FlowApi;

/// Errors that stop a sync run before any record is pushed.
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error("Sync is disabled in local mode")]
    #[diagnostic(
        code(flowstate::sync::local_only),
        help("Switch modes with 'flowstate config mode hybrid' to enable sync")
    )]
    LocalOnlyMode,

    #[error("Cannot reach the FlowState service")]
    #[diagnostic(code(flowstate::sync::offline))]
    Offline,

    #[error("Not authenticated")]
    #[diagnostic(
        code(flowstate::sync::not_authenticated),
        help("Run 'flowstate auth login <email>' to link your account")
    )]
    NotAuthenticated,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Outcome of one push run.
///
/// Per-record failures are accumulated here rather than aborting the run;
/// a report can carry both synced counts and errors.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub tasks_synced: usize,
    pub pomodoros_synced: usize,
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Push-only reconciliation of local records against the cloud.
///
/// Records created locally (no `remote_id` yet) are pushed as creations;
/// records that already carry a `remote_id` only get their dirty flag
/// cleared. The cloud is never pulled from and never wins a conflict.
pub struct SyncEngine<'a, A: FlowApi> {
    api: &'a A,
    db: &'a SqliteDatabase,
    settings: &'a Settings,
}

impl<'a, A: FlowApi + Sync> SyncEngine<'a, A> {
    pub fn new(api: &'a A, db: &'a SqliteDatabase, settings: &'a Settings) -> Self {
        Self { api, db, settings }
    }

    /// Run a full push for one user: tasks first, then pomodoros.
    ///
    /// Pomodoros go second so that a pomodoro tied to a just-created task
    /// can reference the task's fresh cloud id in the same run.
    pub async fn sync_all(&self, user_id: i64) -> SyncResult<SyncReport> {
        if self.settings.mode == Mode::Local {
            return Err(SyncError::LocalOnlyMode);
        }
        if !self.api.check_connectivity().await {
            return Err(SyncError::Offline);
        }
        if !self.settings.is_authenticated() {
            return Err(SyncError::NotAuthenticated);
        }

        let mut report = SyncReport::default();
        self.push_tasks(user_id, &mut report).await?;
        self.push_pomodoros(user_id, &mut report).await?;

        info!(
            tasks = report.tasks_synced,
            pomodoros = report.pomodoros_synced,
            errors = report.errors.len(),
            "sync run finished"
        );
        Ok(report)
    }

    async fn push_tasks(&self, user_id: i64, report: &mut SyncReport) -> SyncResult<()> {
        let tasks = self.db.tasks();
        let pending = tasks.pending_sync(user_id).await?;
        debug!(count = pending.len(), "pushing tasks");

        let mut outcomes = Vec::new();
        for task in &pending {
            match task.remote_id {
                // Already known to the cloud; only the flag is stale.
                Some(_) => outcomes.push(SyncOutcome {
                    local_id: task.id,
                    remote_id: None,
                }),
                None => match self.api.create_task(&task.description).await {
                    Ok(remote) => outcomes.push(SyncOutcome {
                        local_id: task.id,
                        remote_id: Some(remote.id),
                    }),
                    Err(e) => report
                        .errors
                        .push(format!("Task sync error (ID {}): {}", task.id, e)),
                },
            }
        }

        report.tasks_synced = outcomes.len();
        tasks.apply_sync_results(&outcomes).await?;
        Ok(())
    }

    async fn push_pomodoros(&self, user_id: i64, report: &mut SyncReport) -> SyncResult<()> {
        let pomodoros = self.db.pomodoros();
        let pending = pomodoros.pending_sync(user_id).await?;
        debug!(count = pending.len(), "pushing pomodoros");

        let mut outcomes = Vec::new();
        for pomodoro in &pending {
            match pomodoro.remote_id {
                Some(_) => outcomes.push(SyncOutcome {
                    local_id: pomodoro.id,
                    remote_id: None,
                }),
                None => match self.push_one_pomodoro(user_id, pomodoro).await {
                    Ok(remote_id) => outcomes.push(SyncOutcome {
                        local_id: pomodoro.id,
                        remote_id: Some(remote_id),
                    }),
                    Err(e) => report
                        .errors
                        .push(format!("Pomodoro sync error (ID {}): {}", pomodoro.id, e)),
                },
            }
        }

        report.pomodoros_synced = outcomes.len();
        pomodoros.apply_sync_results(&outcomes).await?;
        Ok(())
    }

    /// Create one pomodoro remotely, completing it in the same pass when
    /// it already finished locally. A failure anywhere leaves the record
    /// dirty so the next run retries it whole.
    async fn push_one_pomodoro(
        &self,
        user_id: i64,
        pomodoro: &crate::db::Pomodoro,
    ) -> Result<i64, crate::remote::RemoteError> {
        let remote_task_id = match pomodoro.task_id {
            Some(local_task_id) => self
                .db
                .tasks()
                .get(user_id, local_task_id)
                .await
                .ok()
                .and_then(|t| t.remote_id),
            None => None,
        };

        let remote = self
            .api
            .start_pomodoro(
                remote_task_id,
                pomodoro.session_type,
                pomodoro.duration_minutes,
            )
            .await?;
        if pomodoro.completed {
            self.api.complete_pomodoro(remote.id).await?;
        }
        Ok(remote.id)
    }
}
