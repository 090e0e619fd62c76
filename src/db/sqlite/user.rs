//! SQLite user repository.

use sqlx::{Row, SqlitePool};

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, User, UserSettingsUpdate};

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> SqliteUserRepository<'a> {
    /// Insert a new user and return it with its assigned id.
    pub async fn create(&self, username: &str, email: Option<&str>) -> DbResult<User> {
        let now = current_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        self.get(result.last_insert_rowid()).await
    }

    pub async fn get(&self, id: i64) -> DbResult<User> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        let row = row.ok_or(DbError::NotFound {
            entity_type: "User".to_string(),
            id: id.to_string(),
        })?;

        Ok(row_to_user(&row))
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::database)?;

        Ok(row.as_ref().map(row_to_user))
    }

    /// Apply duration/notification preferences; untouched fields keep
    /// their current values.
    pub async fn update_settings(&self, id: i64, update: &UserSettingsUpdate) -> DbResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET pomo_duration = COALESCE(?, pomo_duration),
                short_break_duration = COALESCE(?, short_break_duration),
                long_break_duration = COALESCE(?, long_break_duration),
                notifications_enabled = COALESCE(?, notifications_enabled),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(update.pomo_duration)
        .bind(update.short_break_duration)
        .bind(update.long_break_duration)
        .bind(update.notifications_enabled)
        .bind(current_timestamp())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(DbError::database)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "User".to_string(),
                id: id.to_string(),
            });
        }

        self.get(id).await
    }

    /// Record the cloud-assigned identifier for this account.
    pub async fn set_remote_id(&self, id: i64, remote_id: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET remote_id = ?, updated_at = ? WHERE id = ?")
            .bind(remote_id)
            .bind(current_timestamp())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(DbError::database)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity_type: "User".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        remote_id: row.get("remote_id"),
        pomo_duration: row.get("pomo_duration"),
        short_break_duration: row.get("short_break_duration"),
        long_break_duration: row.get("long_break_duration"),
        notifications_enabled: row.get("notifications_enabled"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        last_synced_at: row.get("last_synced_at"),
    }
}
