//! Database error types.
//!
//! Storage-backend agnostic; uses miette for diagnostic output and
//! thiserror for the derive. `NotFound` is kept distinct from every other
//! failure because caller UX differs ("no such task" vs "database error").

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(flowstate::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(flowstate::db::invalid_data))]
    InvalidData { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(flowstate::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(flowstate::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(flowstate::db::connection_error))]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn task_not_found(id: i64) -> Self {
        DbError::NotFound {
            entity_type: "Task".to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn pomodoro_not_found(id: i64) -> Self {
        DbError::NotFound {
            entity_type: "Pomodoro".to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn database(e: impl std::fmt::Display) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
