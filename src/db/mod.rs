//! Local record store.
//!
//! Domain models, storage-agnostic error types and the sqlx-backed SQLite
//! repositories for users, tasks and pomodoro sessions. Every local
//! mutation flags the record with `needs_sync` for the push reconciler.

mod error;
mod models;
pub mod sqlite;
mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use sqlite::{
    SqliteDatabase, SqlitePomodoroRepository, SqliteTaskRepository, SqliteUserRepository,
};
pub use utils::current_timestamp;
