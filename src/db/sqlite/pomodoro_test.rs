//! Tests for SqlitePomodoroRepository.

use crate::db::{DbError, SessionType, SqliteDatabase, SyncOutcome};

async fn setup() -> (SqliteDatabase, i64) {
    let db = SqliteDatabase::in_memory().await.expect("in-memory db");
    db.migrate().await.expect("migrate");
    let user = db.users().create("tester", None).await.expect("user");
    (db, user.id)
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_and_without_task() {
    let (db, user_id) = setup().await;
    let task = db.tasks().create(user_id, "Deep work").await.expect("task");

    let with_task = db
        .pomodoros()
        .create(user_id, Some(task.id), SessionType::Focus, 25)
        .await
        .expect("create");
    assert_eq!(with_task.task_id, Some(task.id));
    assert_eq!(with_task.session_type, SessionType::Focus);
    assert_eq!(with_task.duration_minutes, 25);
    assert!(!with_task.completed);
    assert!(with_task.needs_sync);

    let without_task = db
        .pomodoros()
        .create(user_id, None, SessionType::ShortBreak, 5)
        .await
        .expect("create");
    assert_eq!(without_task.task_id, None);
    assert_eq!(without_task.session_type, SessionType::ShortBreak);
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_stamps_and_flags() {
    let (db, user_id) = setup().await;
    let pom = db
        .pomodoros()
        .create(user_id, None, SessionType::Focus, 25)
        .await
        .expect("create");

    let done = db
        .pomodoros()
        .complete(user_id, pom.id)
        .await
        .expect("complete");
    assert!(done.completed);
    assert!(done.completed_at.is_some());
    assert!(done.needs_sync);
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_missing_is_not_found() {
    let (db, user_id) = setup().await;
    let err = db
        .pomodoros()
        .complete(user_id, 777)
        .await
        .expect_err("missing");
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_sync_and_apply() {
    let (db, user_id) = setup().await;
    let poms = db.pomodoros();

    let p = poms
        .create(user_id, None, SessionType::LongBreak, 15)
        .await
        .expect("create");

    assert_eq!(poms.pending_sync(user_id).await.expect("pending").len(), 1);

    poms.apply_sync_results(&[SyncOutcome {
        local_id: p.id,
        remote_id: Some(300),
    }])
    .await
    .expect("apply");

    assert!(poms.pending_sync(user_id).await.expect("pending").is_empty());
    let p = poms.get(user_id, p.id).await.expect("get");
    assert_eq!(p.remote_id, Some(300));
}
