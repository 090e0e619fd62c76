//! SQLite implementation of the record store.

mod connection;
mod pomodoro;
mod task;
mod user;

#[cfg(test)]
mod connection_test;
#[cfg(test)]
mod pomodoro_test;
#[cfg(test)]
mod task_test;
#[cfg(test)]
mod user_test;

pub use connection::SqliteDatabase;
pub use pomodoro::SqlitePomodoroRepository;
pub use task::SqliteTaskRepository;
pub use user::SqliteUserRepository;
