use miette::Diagnostic;
use thiserror::Error;

/// Timer and daemon control errors.
#[derive(Error, Diagnostic, Debug)]
pub enum TimerError {
    #[error("A timer is already running ({remaining} left)")]
    #[diagnostic(
        code(flowstate::timer::already_running),
        help("Stop it with 'flowstate pom stop' first")
    )]
    AlreadyRunning { remaining: String },

    #[error("No timer is running")]
    #[diagnostic(code(flowstate::timer::not_running))]
    NotRunning,

    #[error("Could not start the timer daemon: {message}")]
    #[diagnostic(code(flowstate::timer::daemon_spawn))]
    DaemonSpawn { message: String },

    #[error("Timer state error: {message}")]
    #[diagnostic(code(flowstate::timer::state))]
    State { message: String },

    #[error("Timer I/O error: {0}")]
    #[diagnostic(code(flowstate::timer::io))]
    Io(#[from] std::io::Error),
}

pub type TimerResult<T> = Result<T, TimerError>;
