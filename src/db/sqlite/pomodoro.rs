//! SQLite pomodoro repository.

use std::str::FromStr;

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Pomodoro, SessionType, SyncOutcome};

/// SQLx-backed pomodoro repository.
pub struct SqlitePomodoroRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SqlitePomodoroRepository<'a> {
    pub async fn create(
        &self,
        user_id: i64,
        task_id: Option<i64>,
        session_type: SessionType,
        duration_minutes: i64,
    ) -> DbResult<Pomodoro> {
        let now = current_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO pomodoros
                (user_id, task_id, session_type, duration_minutes, started_at, updated_at, needs_sync)
            VALUES (?, ?, ?, ?, ?, ?, 1)
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .bind(session_type.to_string())
        .bind(duration_minutes)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        self.get(user_id, result.last_insert_rowid()).await
    }

    pub async fn get(&self, user_id: i64, id: i64) -> DbResult<Pomodoro> {
        let row = sqlx::query("SELECT * FROM pomodoros WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        let row = row.ok_or_else(|| DbError::pomodoro_not_found(id))?;
        Ok(row_to_pomodoro(&row))
    }

    pub async fn complete(&self, user_id: i64, id: i64) -> DbResult<Pomodoro> {
        let now = current_timestamp();
        let result = sqlx::query(
            r#"
            UPDATE pomodoros
            SET completed = 1, completed_at = ?, updated_at = ?, needs_sync = 1
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&now)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        if result.rows_affected() == 0 {
            return Err(DbError::pomodoro_not_found(id));
        }

        self.get(user_id, id).await
    }

    /// Completed sessions across all time.
    pub async fn completed_count(&self, user_id: i64) -> DbResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM pomodoros WHERE user_id = ? AND completed = 1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(row.get("n"))
    }

    /// Minutes of completed focus sessions finished at or after `since`.
    pub async fn focus_minutes_since(&self, user_id: i64, since: &str) -> DbResult<i64> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(duration_minutes), 0) AS minutes
            FROM pomodoros
            WHERE user_id = ? AND completed = 1 AND session_type = 'focus'
              AND completed_at >= ?
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(row.get("minutes"))
    }

    /// Sessions with local mutations not yet pushed.
    pub async fn pending_sync(&self, user_id: i64) -> DbResult<Vec<Pomodoro>> {
        let rows = sqlx::query(
            "SELECT * FROM pomodoros WHERE user_id = ? AND needs_sync = 1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(rows.iter().map(row_to_pomodoro).collect())
    }

    /// Commit a sync batch atomically, mirroring the task repository.
    pub async fn apply_sync_results(&self, outcomes: &[SyncOutcome]) -> DbResult<()> {
        if outcomes.is_empty() {
            return Ok(());
        }

        let now = current_timestamp();
        let mut tx = self.pool.begin().await.map_err(DbError::database)?;

        for outcome in outcomes {
            sqlx::query(
                r#"
                UPDATE pomodoros
                SET needs_sync = 0,
                    last_synced_at = ?,
                    remote_id = COALESCE(?, remote_id)
                WHERE id = ?
                "#,
            )
            .bind(&now)
            .bind(outcome.remote_id)
            .bind(outcome.local_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::database)?;
        }

        tx.commit().await.map_err(DbError::database)
    }
}

fn row_to_pomodoro(row: &sqlx::sqlite::SqliteRow) -> Pomodoro {
    Pomodoro {
        id: row.get("id"),
        user_id: row.get("user_id"),
        task_id: row.get("task_id"),
        remote_id: row.get("remote_id"),
        session_type: {
            let s: String = row.get("session_type");
            SessionType::from_str(&s).unwrap_or_default()
        },
        duration_minutes: row.get("duration_minutes"),
        completed: row.get("completed"),
        started_at: row.get("started_at"),
        completed_at: row.get("completed_at"),
        updated_at: row.get("updated_at"),
        last_synced_at: row.get("last_synced_at"),
        needs_sync: row.get("needs_sync"),
    }
}
