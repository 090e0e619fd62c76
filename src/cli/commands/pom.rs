use crate::cli::error::{CliError, CliResult};
use crate::db::SessionType;
use crate::manager::DataManager;
use crate::remote::FlowApi;
use crate::timer::{format_mmss, now_unix, TimerControl, TimerError, TimerState};

/// Start a focus session, attached to the active task when there is one.
///
/// The pomodoro record is opened before the countdown so the daemon can
/// complete it by id when the timer fires.
pub async fn start<A: FlowApi + Sync>(
    manager: &DataManager<A>,
    control: &TimerControl,
    duration: Option<i64>,
) -> CliResult<String> {
    if let Some(snapshot) = control.status() {
        return Err(TimerError::AlreadyRunning {
            remaining: format_mmss(snapshot.remaining_seconds),
        }
        .into());
    }

    let user = manager.get_current_user().await?;
    let minutes = duration.unwrap_or(user.pomo_duration);
    if minutes <= 0 {
        return Err(CliError::invalid_argument(
            "Duration must be a positive number of minutes.",
        ));
    }

    let active = manager.get_active_task().await?;
    let pomodoro = manager
        .start_pomodoro(
            active.as_ref().map(|t| t.id),
            SessionType::Focus,
            minutes,
        )
        .await?;

    let state = TimerState::begin(
        SessionType::Focus,
        minutes,
        active.as_ref().map(|t| t.id),
        active.as_ref().map(|t| t.description.clone()),
        now_unix(),
    )
    .with_pomodoro_id(pomodoro.id);
    control.start_timer(state).await?;

    Ok(match active {
        Some(task) => format!("🍅 Pomodoro started: {} ({} min)", task.description, minutes),
        None => format!("🍅 Pomodoro started ({} min)", minutes),
    })
}

/// Start a short or long break.
pub async fn take_break<A: FlowApi + Sync>(
    manager: &DataManager<A>,
    control: &TimerControl,
    kind: &str,
) -> CliResult<String> {
    if let Some(snapshot) = control.status() {
        return Err(TimerError::AlreadyRunning {
            remaining: format_mmss(snapshot.remaining_seconds),
        }
        .into());
    }

    let user = manager.get_current_user().await?;
    let (session_type, minutes) = match kind {
        "short" => (SessionType::ShortBreak, user.short_break_duration),
        "long" => (SessionType::LongBreak, user.long_break_duration),
        other => {
            return Err(CliError::invalid_argument(format!(
                "Unknown break '{}'; use 'short' or 'long'.",
                other
            )))
        }
    };

    let pomodoro = manager.start_pomodoro(None, session_type, minutes).await?;
    let state = TimerState::begin(session_type, minutes, None, None, now_unix())
        .with_pomodoro_id(pomodoro.id);
    control.start_timer(state).await?;

    Ok(format!("☕ {} started ({} min)", session_type.label(), minutes))
}

/// Toggle pause on the running timer.
pub fn pause(control: &TimerControl) -> CliResult<String> {
    let paused = control.pause_timer()?;
    let snapshot = control.status();
    let remaining = snapshot
        .map(|s| format_mmss(s.remaining_seconds))
        .unwrap_or_else(|| "00:00".to_string());

    Ok(if paused {
        format!("⏸ Paused with {} left", remaining)
    } else {
        format!("▶ Resumed, {} left", remaining)
    })
}

/// Abort the running timer without recording a completion.
pub fn stop(control: &TimerControl) -> CliResult<String> {
    let state = control.stop_timer()?;
    Ok(format!(
        "⏹ {} stopped with {} left",
        state.session_type.label(),
        format_mmss(state.remaining_at(now_unix()))
    ))
}

/// Show the countdown.
pub fn status(control: &TimerControl) -> CliResult<String> {
    let snapshot = match control.status() {
        Some(snapshot) => snapshot,
        None => return Ok("No timer running. Start one with 'flowstate pom start'.".to_string()),
    };

    let mut line = format!(
        "{} {}: {} left",
        if snapshot.paused { "⏸" } else { "🍅" },
        snapshot.session_type.label(),
        format_mmss(snapshot.remaining_seconds)
    );
    if let Some(task) = &snapshot.task_description {
        line.push_str(&format!(" - {}", task));
    }
    if snapshot.paused {
        line.push_str(" (paused)");
    }
    Ok(line)
}

pub async fn daemon_start(control: &TimerControl) -> CliResult<String> {
    if control.daemon_running() {
        return Ok("Timer daemon is already running.".to_string());
    }
    control.ensure_daemon().await?;
    Ok("✓ Timer daemon started".to_string())
}

pub fn daemon_stop(control: &TimerControl) -> CliResult<String> {
    if control.stop_daemon()? {
        Ok("✓ Timer daemon stopped".to_string())
    } else {
        Ok("Timer daemon is not running.".to_string())
    }
}

pub fn daemon_status(control: &TimerControl) -> CliResult<String> {
    Ok(if control.daemon_running() {
        "Timer daemon is running.".to_string()
    } else {
        "Timer daemon is not running.".to_string()
    })
}
