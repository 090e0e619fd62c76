//! CLI-side control of the out-of-process timer daemon.
//!
//! The daemon is a second binary shipped next to the CLI. Liveness is
//! tracked with a pid file; commands talk to the daemon only through the
//! shared state file, never over a socket.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, warn};

use super::error::{TimerError, TimerResult};
use super::state::{format_mmss, now_unix, StateFile, TimerState};
use crate::config::ConfigStore;
use crate::db::SessionType;

const DAEMON_BINARY: &str = "flowstate-timerd";
const SPAWN_WAIT: Duration = Duration::from_millis(100);
const SPAWN_ATTEMPTS: u32 = 20;

/// Point-in-time view of the countdown for status output.
#[derive(Debug, Clone)]
pub struct TimerSnapshot {
    pub session_type: SessionType,
    pub task_description: Option<String>,
    pub paused: bool,
    pub remaining_seconds: i64,
    pub duration_seconds: i64,
}

pub struct TimerControl {
    dir: PathBuf,
}

impl TimerControl {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_store(store: &ConfigStore) -> Self {
        Self::new(store.dir())
    }

    pub fn state_file(&self) -> StateFile {
        StateFile::new(self.dir.join("timer_state.json"))
    }

    pub fn pid_path(&self) -> PathBuf {
        self.dir.join("timer.pid")
    }

    /// Whether a daemon process is alive. A pid file whose process is gone
    /// (or whose content is unreadable) counts as stale and is removed.
    pub fn daemon_running(&self) -> bool {
        let path = self.pid_path();
        let pid = match read_pid(&path) {
            Some(pid) => pid,
            None => {
                if path.exists() {
                    warn!("removing unreadable pid file {}", path.display());
                    let _ = fs::remove_file(&path);
                }
                return false;
            }
        };

        if process_alive(pid) {
            true
        } else {
            debug!("removing stale pid file for dead process {}", pid);
            let _ = fs::remove_file(&path);
            false
        }
    }

    /// Spawn the daemon if it is not already running, then wait for it to
    /// write its pid file.
    pub async fn ensure_daemon(&self) -> TimerResult<()> {
        if self.daemon_running() {
            return Ok(());
        }

        let exe = std::env::current_exe().map_err(|e| TimerError::DaemonSpawn {
            message: e.to_string(),
        })?;
        let daemon = exe.with_file_name(DAEMON_BINARY);

        let mut cmd = Command::new(&daemon);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Detach from the CLI's process group so a Ctrl-C in the shell
            // does not take the daemon down with it.
            cmd.process_group(0);
        }
        cmd.spawn().map_err(|e| TimerError::DaemonSpawn {
            message: format!("{}: {}", daemon.display(), e),
        })?;

        for _ in 0..SPAWN_ATTEMPTS {
            if self.pid_path().exists() {
                return Ok(());
            }
            tokio::time::sleep(SPAWN_WAIT).await;
        }
        Err(TimerError::DaemonSpawn {
            message: "daemon started but never reported a pid".to_string(),
        })
    }

    /// Terminate the daemon and clean up its files. Returns `false` when
    /// no daemon was running.
    pub fn stop_daemon(&self) -> TimerResult<bool> {
        let path = self.pid_path();
        let pid = match read_pid(&path) {
            Some(pid) if process_alive(pid) => pid,
            _ => {
                let _ = fs::remove_file(&path);
                self.state_file().clear()?;
                return Ok(false);
            }
        };

        terminate(pid);
        let _ = fs::remove_file(&path);
        self.state_file().clear()?;
        Ok(true)
    }

    /// Begin a countdown, starting the daemon first when needed.
    pub async fn start_timer(&self, state: TimerState) -> TimerResult<()> {
        let now = now_unix();
        let file = self.state_file();
        let current = file.load();
        if current.active && current.remaining_at(now) > 0 {
            return Err(TimerError::AlreadyRunning {
                remaining: format_mmss(current.remaining_at(now)),
            });
        }

        file.save(&state)?;
        self.ensure_daemon().await?;
        Ok(())
    }

    /// Abort the current countdown, returning its final state.
    pub fn stop_timer(&self) -> TimerResult<TimerState> {
        let file = self.state_file();
        let state = file.load();
        if !state.active {
            return Err(TimerError::NotRunning);
        }
        file.clear()?;
        Ok(state)
    }

    /// Toggle pause. Returns `true` when the timer is now paused.
    pub fn pause_timer(&self) -> TimerResult<bool> {
        let now = now_unix();
        let file = self.state_file();
        let mut state = file.load();
        if !state.active || state.remaining_at(now) == 0 {
            return Err(TimerError::NotRunning);
        }

        if state.paused {
            state.resume(now);
        } else {
            state.pause(now);
        }
        file.save(&state)?;
        Ok(state.paused)
    }

    /// Current countdown, or `None` when nothing is running or the timer
    /// already hit zero and awaits daemon cleanup.
    pub fn status(&self) -> Option<TimerSnapshot> {
        let state = self.state_file().load();
        if !state.active {
            return None;
        }
        let remaining = state.remaining_at(now_unix());
        if remaining == 0 && !state.paused {
            return None;
        }
        Some(TimerSnapshot {
            session_type: state.session_type,
            task_description: state.task_description,
            paused: state.paused,
            remaining_seconds: remaining,
            duration_seconds: state.duration_seconds,
        })
    }
}

fn read_pid(path: &Path) -> Option<i32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(unix)]
fn process_alive(pid: i32) -> bool {
    // Signal 0 probes for existence without delivering anything.
    unsafe { libc::kill(pid, 0) == 0 }
}

#[cfg(not(unix))]
fn process_alive(_pid: i32) -> bool {
    true
}

#[cfg(unix)]
fn terminate(pid: i32) {
    unsafe {
        libc::kill(pid, libc::SIGTERM);
    }
}

#[cfg(not(unix))]
fn terminate(_pid: i32) {}
