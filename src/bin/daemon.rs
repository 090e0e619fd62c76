//! FlowState timer daemon binary.
//!
//! Spawned by the CLI when a timer starts; keeps the countdown honest
//! across CLI invocations and fires the end-of-session notification.

use flowstate::config::{ConfigError, ConfigStore};
use flowstate::timer::{run_daemon, TimerError};
use miette::Diagnostic;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(flowstate::binary::config))]
    Config(#[from] ConfigError),

    #[error("Timer daemon error: {0}")]
    #[diagnostic(code(flowstate::binary::timer))]
    Timer(#[from] TimerError),
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let store = ConfigStore::open_default()?;
    run_daemon(store).await?;
    Ok(())
}
