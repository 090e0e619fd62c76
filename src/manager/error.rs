//! Data manager error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;
use crate::remote::RemoteError;

/// Failures surfaced by data manager operations.
///
/// `NotFound` stays its own variant so the CLI can say "no such task"
/// instead of "network error".
#[derive(Error, Diagnostic, Debug)]
pub enum ManagerError {
    #[error("{entity_type} not found: {id}")]
    #[diagnostic(code(flowstate::manager::not_found))]
    NotFound { entity_type: String, id: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(flowstate::manager::config))]
    Config(#[from] ConfigError),
}

impl ManagerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManagerError::NotFound { .. })
    }
}

impl From<DbError> for ManagerError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity_type, id } => ManagerError::NotFound { entity_type, id },
            other => ManagerError::Db(other),
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
