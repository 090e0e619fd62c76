//! Tests for the config store.

use crate::config::{ConfigStore, Mode, Settings};

#[test]
fn load_missing_file_returns_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("open store");

    let settings = store.load();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.mode, Mode::Hybrid);
    assert_eq!(settings.pomo_duration, 25);
}

#[test]
fn save_and_load_roundtrip() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("open store");

    let mut settings = Settings::default();
    settings.mode = Mode::Local;
    settings.auth_token = Some("tok_123".to_string());
    settings.local_user_id = Some(7);
    settings.pomo_duration = 50;

    store.save(&settings).expect("save");
    let loaded = store.load();
    assert_eq!(loaded, settings);
}

#[test]
fn corrupted_file_resets_to_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("open store");

    std::fs::write(store.config_path(), "{not json at all").expect("write garbage");
    let settings = store.load();
    assert_eq!(settings, Settings::default());
}

#[test]
fn unknown_keys_are_ignored() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("open store");

    std::fs::write(
        store.config_path(),
        r#"{"mode": "cloud", "some_future_key": 42}"#,
    )
    .expect("write");

    let settings = store.load();
    assert_eq!(settings.mode, Mode::Cloud);
    assert_eq!(settings.pomo_duration, 25);
}

#[test]
fn mode_parses_from_str() {
    assert_eq!("local".parse::<Mode>(), Ok(Mode::Local));
    assert_eq!("cloud".parse::<Mode>(), Ok(Mode::Cloud));
    assert_eq!("hybrid".parse::<Mode>(), Ok(Mode::Hybrid));
    assert!("remote".parse::<Mode>().is_err());
}

#[test]
fn is_authenticated_requires_nonempty_token() {
    let mut settings = Settings::default();
    assert!(!settings.is_authenticated());
    settings.auth_token = Some(String::new());
    assert!(!settings.is_authenticated());
    settings.auth_token = Some("tok".to_string());
    assert!(settings.is_authenticated());
}
