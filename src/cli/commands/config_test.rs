use tempfile::TempDir;

use super::config;
use crate::cli::error::CliError;
use crate::config::{ConfigStore, Mode};
use crate::db::SqliteDatabase;
use crate::manager::{DataManager, LocalStore};
use crate::remote::stub::StubApi;

async fn local_manager() -> (DataManager<StubApi>, ConfigStore, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("config store");
    let db = SqliteDatabase::in_memory().await.expect("db");
    db.migrate().await.expect("migrate");
    let manager = DataManager::Local(LocalStore::new(db, store.clone()));
    (manager, store, tmp)
}

#[test]
fn show_masks_the_auth_token() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("config store");
    let mut settings = store.load();
    settings.auth_token = Some("super-secret".to_string());
    store.save(&settings).unwrap();

    let output = config::show(&store).unwrap();

    assert!(output.contains("set (hidden)"));
    assert!(!output.contains("super-secret"));
}

#[tokio::test(flavor = "multi_thread")]
async fn set_duration_drives_the_next_session() {
    let (manager, store, _tmp) = local_manager().await;

    let output = config::set(&manager, &store, "pomo_duration", "50")
        .await
        .unwrap();
    assert!(output.contains("✓ Set pomo_duration = 50"));

    // The session commands read durations from the user record, so the
    // update has to land there, not just in the config file.
    let user = manager.get_current_user().await.unwrap();
    assert_eq!(user.pomo_duration, 50);
    assert_eq!(store.load().pomo_duration, 50);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_routes_break_and_notification_keys_to_the_user_record() {
    let (manager, store, _tmp) = local_manager().await;

    config::set(&manager, &store, "short_break_duration", "7")
        .await
        .unwrap();
    config::set(&manager, &store, "long_break_duration", "20")
        .await
        .unwrap();
    config::set(&manager, &store, "notifications_enabled", "off")
        .await
        .unwrap();

    let user = manager.get_current_user().await.unwrap();
    assert_eq!(user.short_break_duration, 7);
    assert_eq!(user.long_break_duration, 20);
    assert!(!user.notifications_enabled);
    assert!(!store.load().notifications_enabled);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_rejects_unknown_keys_and_bad_values() {
    let (manager, store, _tmp) = local_manager().await;

    assert!(matches!(
        config::set(&manager, &store, "nonsense", "1").await,
        Err(CliError::InvalidArgument { .. })
    ));
    assert!(matches!(
        config::set(&manager, &store, "pomo_duration", "soon").await,
        Err(CliError::InvalidArgument { .. })
    ));
    assert!(matches!(
        config::set(&manager, &store, "pomo_duration", "0").await,
        Err(CliError::InvalidArgument { .. })
    ));
    assert!(matches!(
        config::set(&manager, &store, "sound_enabled", "loud").await,
        Err(CliError::InvalidArgument { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn set_parses_booleans() {
    let (manager, store, _tmp) = local_manager().await;

    config::set(&manager, &store, "sound_enabled", "off")
        .await
        .unwrap();
    assert!(!store.load().sound_enabled);

    config::set(&manager, &store, "auto_sync", "true")
        .await
        .unwrap();
    assert!(store.load().auto_sync);
}

#[test]
fn mode_switches_and_validates() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("config store");

    let output = config::mode(&store, "local").unwrap();
    assert!(output.contains("✓ Mode set to local"));
    assert_eq!(store.load().mode, Mode::Local);

    assert!(matches!(
        config::mode(&store, "offline"),
        Err(CliError::InvalidArgument { .. })
    ));
}
