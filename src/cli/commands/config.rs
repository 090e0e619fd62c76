use std::str::FromStr;

use tabled::builder::Builder;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::apply_table_style;
use crate::config::{ConfigStore, Mode};
use crate::db::UserSettingsUpdate;
use crate::manager::DataManager;
use crate::remote::FlowApi;

/// Display the current configuration.
pub fn show(store: &ConfigStore) -> CliResult<String> {
    let settings = store.load();

    let mut builder = Builder::default();
    builder.push_record(["Key", "Value"]);
    builder.push_record(["mode", &settings.mode.to_string()]);
    builder.push_record(["api_base_url", &settings.api_base_url]);
    builder.push_record([
        "auth_token",
        if settings.is_authenticated() {
            "set (hidden)"
        } else {
            "-"
        },
    ]);
    builder.push_record(["pomo_duration", &settings.pomo_duration.to_string()]);
    builder.push_record([
        "short_break_duration",
        &settings.short_break_duration.to_string(),
    ]);
    builder.push_record([
        "long_break_duration",
        &settings.long_break_duration.to_string(),
    ]);
    builder.push_record([
        "notifications_enabled",
        &settings.notifications_enabled.to_string(),
    ]);
    builder.push_record(["sound_enabled", &settings.sound_enabled.to_string()]);
    builder.push_record(["auto_sync", &settings.auto_sync.to_string()]);
    builder.push_record(["blocked_sites", &settings.blocked_sites.join(", ")]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    Ok(table.to_string())
}

/// Update a single configuration key.
///
/// Session keys (durations, notifications) live on the user record that
/// `pom start`/`pom break` read, so they go through the data manager; the
/// config file copy is refreshed alongside so `config show` and the
/// daemon see the same values. The remaining keys are config-file only.
pub async fn set<A: FlowApi + Sync>(
    manager: &DataManager<A>,
    store: &ConfigStore,
    key: &str,
    value: &str,
) -> CliResult<String> {
    let mut settings = store.load();
    let mut update = UserSettingsUpdate::default();

    match key {
        "pomo_duration" => {
            let minutes = parse_minutes(key, value)?;
            update.pomo_duration = Some(minutes);
            settings.pomo_duration = minutes;
        }
        "short_break_duration" => {
            let minutes = parse_minutes(key, value)?;
            update.short_break_duration = Some(minutes);
            settings.short_break_duration = minutes;
        }
        "long_break_duration" => {
            let minutes = parse_minutes(key, value)?;
            update.long_break_duration = Some(minutes);
            settings.long_break_duration = minutes;
        }
        "notifications_enabled" => {
            let enabled = parse_bool(key, value)?;
            update.notifications_enabled = Some(enabled);
            settings.notifications_enabled = enabled;
        }
        "sound_enabled" => settings.sound_enabled = parse_bool(key, value)?,
        "auto_sync" => settings.auto_sync = parse_bool(key, value)?,
        "api_base_url" => settings.api_base_url = value.trim_end_matches('/').to_string(),
        other => {
            return Err(CliError::invalid_argument(format!(
                "Unknown setting '{}'. Run 'flowstate config show' for the available keys.",
                other
            )))
        }
    }

    if update != UserSettingsUpdate::default() {
        manager.update_user_settings(&update).await?;
    }
    store.save(&settings)?;
    Ok(format!("✓ Set {} = {}", key, value))
}

/// Switch the data mode (local, cloud or hybrid).
pub fn mode(store: &ConfigStore, mode: &str) -> CliResult<String> {
    let mode = Mode::from_str(mode)
        .map_err(|e| CliError::invalid_argument(format!("{}. Use local, cloud or hybrid.", e)))?;

    let mut settings = store.load();
    settings.mode = mode;
    store.save(&settings)?;
    Ok(format!("✓ Mode set to {}", mode))
}

fn parse_minutes(key: &str, value: &str) -> CliResult<i64> {
    let minutes: i64 = value.parse().map_err(|_| {
        CliError::invalid_argument(format!("{} expects a number of minutes, got '{}'", key, value))
    })?;
    if minutes <= 0 {
        return Err(CliError::invalid_argument(format!(
            "{} must be positive",
            key
        )));
    }
    Ok(minutes)
}

fn parse_bool(key: &str, value: &str) -> CliResult<bool> {
    match value {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        other => Err(CliError::invalid_argument(format!(
            "{} expects true or false, got '{}'",
            key, other
        ))),
    }
}
