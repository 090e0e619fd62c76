//! Tests for SqliteTaskRepository.

use crate::db::{DbError, SqliteDatabase, SyncOutcome};

async fn setup() -> (SqliteDatabase, i64) {
    let db = SqliteDatabase::in_memory().await.expect("in-memory db");
    db.migrate().await.expect("migrate");
    let user = db.users().create("tester", None).await.expect("user");
    (db, user.id)
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let task = tasks
        .create(user_id, "Write the report")
        .await
        .expect("create");

    assert_eq!(task.description, "Write the report");
    assert!(!task.is_completed);
    assert!(!task.is_active);
    assert!(task.needs_sync);
    assert_eq!(task.remote_id, None);

    let fetched = tasks.get(user_id, task.id).await.expect("get");
    assert_eq!(fetched, task);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_empty_description() {
    let (db, user_id) = setup().await;
    let err = db
        .tasks()
        .create(user_id, "   ")
        .await
        .expect_err("should fail");
    assert!(matches!(err, DbError::InvalidData { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_scoped_by_user() {
    let (db, user_id) = setup().await;
    let other = db.users().create("other", None).await.expect("user");
    let task = db.tasks().create(user_id, "Mine").await.expect("create");

    // Another user's lookup of this id is NotFound, not a leak.
    let err = db
        .tasks()
        .get(other.id, task.id)
        .await
        .expect_err("should fail");
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_excludes_completed_by_default() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let a = tasks.create(user_id, "Open one").await.expect("create");
    let b = tasks.create(user_id, "Done one").await.expect("create");
    tasks.complete(user_id, b.id).await.expect("complete");

    let open = tasks.list(user_id, false).await.expect("list");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, a.id);

    let all = tasks.list(user_id, true).await.expect("list all");
    assert_eq!(all.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_active_keeps_at_most_one_active() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let a = tasks.create(user_id, "First").await.expect("create");
    let b = tasks.create(user_id, "Second").await.expect("create");
    let c = tasks.create(user_id, "Third").await.expect("create");

    for id in [a.id, b.id, c.id, b.id] {
        tasks.set_active(user_id, id).await.expect("activate");
        let actives: Vec<_> = tasks
            .list(user_id, true)
            .await
            .expect("list")
            .into_iter()
            .filter(|t| t.is_active)
            .collect();
        assert_eq!(actives.len(), 1, "exactly one active after each start");
        assert_eq!(actives[0].id, id);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn set_active_unknown_task_rolls_back() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let a = tasks.create(user_id, "Keep me active").await.expect("create");
    tasks.set_active(user_id, a.id).await.expect("activate");

    let err = tasks.set_active(user_id, 9999).await.expect_err("missing");
    assert!(matches!(err, DbError::NotFound { .. }));

    // The failed activation must not have deactivated the current task.
    let active = tasks.active_task(user_id).await.expect("active");
    assert_eq!(active.expect("still active").id, a.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_clears_active_and_stamps() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let t = tasks.create(user_id, "Finish me").await.expect("create");
    tasks.set_active(user_id, t.id).await.expect("activate");

    let done = tasks.complete(user_id, t.id).await.expect("complete");
    assert!(done.is_completed);
    assert!(!done.is_active);
    assert!(done.completed_at.is_some());
    assert!(done.needs_sync);

    let active = tasks.active_task(user_id).await.expect("active");
    assert!(active.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_removed_task() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let t = tasks.create(user_id, "Remove me").await.expect("create");
    let removed = tasks.delete(user_id, t.id).await.expect("delete");
    assert_eq!(removed.id, t.id);

    let err = tasks.get(user_id, t.id).await.expect_err("gone");
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn apply_sync_results_clears_flags_atomically() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let a = tasks.create(user_id, "A").await.expect("create");
    let b = tasks.create(user_id, "B").await.expect("create");

    let pending = tasks.pending_sync(user_id).await.expect("pending");
    assert_eq!(pending.len(), 2);

    tasks
        .apply_sync_results(&[
            SyncOutcome {
                local_id: a.id,
                remote_id: Some(100),
            },
            SyncOutcome {
                local_id: b.id,
                remote_id: Some(101),
            },
        ])
        .await
        .expect("apply");

    let pending = tasks.pending_sync(user_id).await.expect("pending");
    assert!(pending.is_empty());

    let a = tasks.get(user_id, a.id).await.expect("get");
    assert_eq!(a.remote_id, Some(100));
    assert!(a.last_synced_at.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn apply_sync_results_keeps_existing_remote_id() {
    let (db, user_id) = setup().await;
    let tasks = db.tasks();

    let t = tasks.create(user_id, "Linked").await.expect("create");
    tasks
        .apply_sync_results(&[SyncOutcome {
            local_id: t.id,
            remote_id: Some(55),
        }])
        .await
        .expect("first sync");

    // A later sync with no new remote id must not erase the link.
    tasks.complete(user_id, t.id).await.expect("complete");
    tasks
        .apply_sync_results(&[SyncOutcome {
            local_id: t.id,
            remote_id: None,
        }])
        .await
        .expect("second sync");

    let t = tasks.get(user_id, t.id).await.expect("get");
    assert_eq!(t.remote_id, Some(55));
    assert!(!t.needs_sync);
}
