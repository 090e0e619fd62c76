//! Daemon main loop.
//!
//! Runs as the `flowstate-timerd` binary: writes a pid file, ticks once a
//! second recomputing the countdown from wall-clock time, fires the end
//! of-session notification and exits cleanly on SIGTERM or Ctrl-C.

use std::fs;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::control::TimerControl;
use super::error::TimerResult;
use super::notify;
use super::state::now_unix;
use crate::config::ConfigStore;

pub async fn run_daemon(store: ConfigStore) -> TimerResult<()> {
    let control = TimerControl::from_store(&store);
    let pid_path = control.pid_path();
    if let Some(parent) = pid_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&pid_path, std::process::id().to_string())?;
    info!("timer daemon started, pid {}", std::process::id());

    let state_file = control.state_file();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut shutdown = std::pin::pin!(shutdown_signal());

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let mut state = state_file.load();
                if !state.active || state.paused {
                    continue;
                }

                let now = now_unix();
                if state.remaining_at(now) == 0 {
                    info!("session finished: {}", state.session_type);
                    let settings = store.load();
                    notify::session_finished(&settings, &state);
                    if let Some(pomodoro_id) = state.pomodoro_id {
                        record_completion(&store, pomodoro_id).await;
                    }
                    state_file.clear()?;
                } else {
                    state.last_update = now;
                    state_file.save(&state)?;
                }
            }
        }
    }

    debug!("timer daemon shutting down");
    state_file.clear()?;
    let _ = fs::remove_file(&pid_path);
    Ok(())
}

/// Best effort: a full session produces a completed pomodoro record, but
/// a bookkeeping failure must not kill the daemon.
async fn record_completion(store: &ConfigStore, pomodoro_id: i64) {
    let settings = store.load();
    match crate::manager::build_manager(&settings, store).await {
        Ok(manager) => {
            if let Err(e) = manager.complete_pomodoro(pomodoro_id).await {
                warn!("could not record completed pomodoro {}: {}", pomodoro_id, e);
            }
        }
        Err(e) => warn!("could not open the data manager: {}", e),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = term.recv() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
