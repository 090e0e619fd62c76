//! Pomodoro countdown: shared state file, daemon loop and CLI controls.

mod control;
mod error;
mod notify;
mod runner;
mod state;


pub use control::{TimerControl, TimerSnapshot};
pub use error::{TimerError, TimerResult};
pub use runner::run_daemon;
pub use state::{format_mmss, now_unix, StateFile, TimerState};
