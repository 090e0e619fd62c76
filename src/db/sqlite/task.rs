//! SQLite task repository.
//!
//! All reads are scoped by user: a task id belonging to another user is a
//! NotFound, not a different error. Every mutation sets `needs_sync`.

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, SyncOutcome, Task};

/// SQLx-backed task repository.
pub struct SqliteTaskRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SqliteTaskRepository<'a> {
    pub async fn create(&self, user_id: i64, description: &str) -> DbResult<Task> {
        if description.trim().is_empty() {
            return Err(DbError::InvalidData {
                message: "Task description must not be empty".to_string(),
            });
        }

        let now = current_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, description, created_at, updated_at, needs_sync)
            VALUES (?, ?, ?, ?, 1)
            "#,
        )
        .bind(user_id)
        .bind(description)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        self.get(user_id, result.last_insert_rowid()).await
    }

    pub async fn get(&self, user_id: i64, id: i64) -> DbResult<Task> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        let row = row.ok_or_else(|| DbError::task_not_found(id))?;
        Ok(row_to_task(&row))
    }

    /// The user's tasks, newest first, open tasks only unless asked
    /// otherwise.
    pub async fn list(&self, user_id: i64, include_completed: bool) -> DbResult<Vec<Task>> {
        let sql = if include_completed {
            "SELECT * FROM tasks WHERE user_id = ? ORDER BY created_at DESC, id DESC"
        } else {
            "SELECT * FROM tasks WHERE user_id = ? AND is_completed = 0
             ORDER BY created_at DESC, id DESC"
        };

        let rows = sqlx::query(sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await
            .map_err(DbError::database)?;

        Ok(rows.iter().map(row_to_task).collect())
    }

    /// Activate one task, deactivating any other active task of the same
    /// user in the same transaction so at most one stays active.
    pub async fn set_active(&self, user_id: i64, id: i64) -> DbResult<Task> {
        let now = current_timestamp();
        let mut tx = self.pool.begin().await.map_err(DbError::database)?;

        sqlx::query(
            r#"
            UPDATE tasks SET is_active = 0, updated_at = ?, needs_sync = 1
            WHERE user_id = ? AND is_active = 1
            "#,
        )
        .bind(&now)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(DbError::database)?;

        let result = sqlx::query(
            r#"
            UPDATE tasks SET is_active = 1, updated_at = ?, needs_sync = 1
            WHERE id = ? AND user_id = ? AND is_completed = 0
            "#,
        )
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(DbError::database)?;

        if result.rows_affected() == 0 {
            // Rolls back the deactivation above.
            return Err(DbError::task_not_found(id));
        }

        tx.commit().await.map_err(DbError::database)?;
        self.get(user_id, id).await
    }

    pub async fn complete(&self, user_id: i64, id: i64) -> DbResult<Task> {
        let now = current_timestamp();
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET is_completed = 1, is_active = 0, completed_at = ?, updated_at = ?, needs_sync = 1
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
            return Err(DbError::task_not_found(id));
        }

        self.get(user_id, id).await
    }

    /// Delete and return the removed task.
    pub async fn delete(&self, user_id: i64, id: i64) -> DbResult<Task> {
        let task = self.get(user_id, id).await?;

        sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(DbError::database)?;

        Ok(task)
    }

    pub async fn active_task(&self, user_id: i64) -> DbResult<Option<Task>> {
        let row = sqlx::query("SELECT * FROM tasks WHERE user_id = ? AND is_active = 1")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        Ok(row.as_ref().map(row_to_task))
    }

    /// Tasks completed at or after `since`.
    pub async fn completed_count_since(&self, user_id: i64, since: &str) -> DbResult<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS n FROM tasks
            WHERE user_id = ? AND is_completed = 1 AND completed_at >= ?
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(row.get("n"))
    }

    /// Tasks with local mutations not yet pushed.
    pub async fn pending_sync(&self, user_id: i64) -> DbResult<Vec<Task>> {
        let rows = sqlx::query(
            "SELECT * FROM tasks WHERE user_id = ? AND needs_sync = 1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(DbError::database)?;

        Ok(rows.iter().map(row_to_task).collect())
    }

    /// Commit a sync batch atomically: clear `needs_sync`, stamp
    /// `last_synced_at` and store any newly assigned remote id.
    pub async fn apply_sync_results(&self, outcomes: &[SyncOutcome]) -> DbResult<()> {
        if outcomes.is_empty() {
            return Ok(());
        }

        let now = current_timestamp();
        let mut tx = self.pool.begin().await.map_err(DbError::database)?;

        for outcome in outcomes {
            sqlx::query(
                r#"
                UPDATE tasks
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

fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        user_id: row.get("user_id"),
        remote_id: row.get("remote_id"),
        description: row.get("description"),
        is_completed: row.get("is_completed"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        completed_at: row.get("completed_at"),
        updated_at: row.get("updated_at"),
        last_synced_at: row.get("last_synced_at"),
        needs_sync: row.get("needs_sync"),
    }
}
