use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::flow::FlowError;
use crate::manager::ManagerError;
use crate::remote::RemoteError;
use crate::sync::SyncError;
use crate::timer::TimerError;

/// Top-level command errors; mostly transparent wrappers so the module
/// diagnostics (codes and help text) reach the terminal unchanged.
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(flowstate::cli::config))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Manager(#[from] ManagerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Timer(#[from] TimerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),

    #[error("{message}")]
    #[diagnostic(code(flowstate::cli::invalid_argument))]
    InvalidArgument { message: String },
}

impl CliError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
