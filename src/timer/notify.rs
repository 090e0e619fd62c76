//! Desktop notification and sound side effects when a session ends.
//!
//! All failures here are swallowed; a missing notification server must
//! never crash the daemon mid-countdown.

use notify_rust::Notification;
use tracing::debug;

use super::state::TimerState;
use crate::config::Settings;
use crate::db::SessionType;

pub fn session_finished(settings: &Settings, state: &TimerState) {
    let (summary, body) = message_for(state);

    if settings.notifications_enabled {
        if let Err(e) = Notification::new()
            .summary(&summary)
            .body(&body)
            .appname("flowstate")
            .show()
        {
            debug!("notification failed: {}", e);
        }
    }

    if settings.sound_enabled {
        play_sound();
    }
}

fn message_for(state: &TimerState) -> (String, String) {
    match state.session_type {
        SessionType::Focus => {
            let body = match &state.task_description {
                Some(task) => format!("Finished working on: {}", task),
                None => "Time for a break.".to_string(),
            };
            ("Pomodoro finished!".to_string(), body)
        }
        SessionType::ShortBreak | SessionType::LongBreak => (
            "Break's over!".to_string(),
            "Back to focus.".to_string(),
        ),
    }
}

#[cfg(target_os = "macos")]
fn play_sound() {
    let _ = std::process::Command::new("afplay")
        .arg("/System/Library/Sounds/Glass.aiff")
        .spawn();
}

#[cfg(target_os = "linux")]
fn play_sound() {
    let _ = std::process::Command::new("paplay")
        .arg("/usr/share/sounds/freedesktop/stereo/complete.oga")
        .spawn();
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn play_sound() {}
