//! Tests for SqliteUserRepository.

use crate::db::{DbError, SqliteDatabase, UserSettingsUpdate};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory().await.expect("in-memory db");
    db.migrate().await.expect("migrate");
    db
}

#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_defaults() {
    let db = setup_db().await;
    let users = db.users();

    let user = users.create("alice", None).await.expect("create");
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, None);
    assert_eq!(user.pomo_duration, 25);
    assert_eq!(user.short_break_duration, 5);
    assert_eq!(user.long_break_duration, 15);
    assert!(user.notifications_enabled);
    assert_eq!(user.remote_id, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_by_username_finds_existing() {
    let db = setup_db().await;
    let users = db.users();

    users
        .create("bob", Some("bob@example.com"))
        .await
        .expect("create");

    let found = users.get_by_username("bob").await.expect("lookup");
    assert_eq!(
        found.expect("should exist").email,
        Some("bob@example.com".to_string())
    );

    let missing = users.get_by_username("nobody").await.expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_user_is_not_found() {
    let db = setup_db().await;
    let err = db.users().get(42).await.expect_err("should fail");
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_settings_applies_only_given_fields() {
    let db = setup_db().await;
    let users = db.users();

    let user = users.create("carol", None).await.expect("create");

    let updated = users
        .update_settings(
            user.id,
            &UserSettingsUpdate {
                pomo_duration: Some(50),
                notifications_enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.pomo_duration, 50);
    assert!(!updated.notifications_enabled);
    // Untouched fields keep their defaults.
    assert_eq!(updated.short_break_duration, 5);
    assert_eq!(updated.long_break_duration, 15);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_remote_id_links_account() {
    let db = setup_db().await;
    let users = db.users();

    let user = users.create("dave", None).await.expect("create");
    users.set_remote_id(user.id, 901).await.expect("link");

    let reloaded = users.get(user.id).await.expect("get");
    assert_eq!(reloaded.remote_id, Some(901));
}
