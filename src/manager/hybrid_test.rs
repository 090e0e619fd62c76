//! Tests for hybrid fallback behavior.

use std::sync::atomic::Ordering;

use tempfile::TempDir;

use crate::config::ConfigStore;
use crate::db::{SessionType, SqliteDatabase};
use crate::manager::{CloudStore, HybridStore, LocalStore};
use crate::remote::stub::StubApi;

async fn hybrid_with(api: StubApi) -> (HybridStore<StubApi>, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = ConfigStore::open(tmp.path()).expect("config store");
    let db = SqliteDatabase::in_memory().await.expect("db");
    db.migrate().await.expect("migrate");
    let local = LocalStore::new(db, config);
    (HybridStore::new(CloudStore::new(api), local), tmp)
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_cloud_falls_back_to_local_silently() {
    let (hybrid, _tmp) = hybrid_with(StubApi::failing()).await;

    // Every operation must succeed via local despite the remote erroring.
    let task = hybrid.create_task("Offline work").await.expect("create");
    hybrid.start_task(task.id).await.expect("start");

    let active = hybrid.get_active_task().await.expect("active");
    assert_eq!(active.expect("some").id, task.id);

    hybrid.complete_task(task.id).await.expect("complete");

    let pom = hybrid
        .start_pomodoro(None, SessionType::Focus, 25)
        .await
        .expect("pomodoro");
    hybrid.complete_pomodoro(pom.id).await.expect("complete pom");

    let user = hybrid.get_current_user().await.expect("user");
    assert_ne!(user.id, 9000, "must come from local, not the stub cloud");
}

#[tokio::test(flavor = "multi_thread")]
async fn offline_probe_skips_cloud_entirely() {
    let (hybrid, _tmp) = hybrid_with(StubApi::offline()).await;

    hybrid.create_task("No network").await.expect("create");

    let api = hybrid.cloud().api();
    assert_eq!(api.connectivity_checks.load(Ordering::SeqCst), 1);
    assert_eq!(
        api.create_task_calls.load(Ordering::SeqCst),
        0,
        "offline probe must prevent any cloud attempt"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn fallback_attempts_each_backend_once() {
    let (hybrid, _tmp) = hybrid_with(StubApi::failing()).await;

    hybrid.create_task("One try per side").await.expect("create");

    let api = hybrid.cloud().api();
    assert_eq!(api.create_task_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn reachable_cloud_is_used() {
    let (hybrid, _tmp) = hybrid_with(StubApi::online()).await;

    let task = hybrid.create_task("Cloud task").await.expect("create");
    // Stub cloud ids start at 8001; local AUTOINCREMENT ids start at 1.
    assert!(task.id > 8000, "expected the cloud to serve this call");

    let user = hybrid.get_current_user().await.expect("user");
    assert_eq!(user.id, 9000);
}

#[tokio::test(flavor = "multi_thread")]
async fn hybrid_matches_local_results_when_remote_always_fails() {
    let (hybrid, _tmp) = hybrid_with(StubApi::failing()).await;

    let a = hybrid.create_task("one").await.expect("create");
    let b = hybrid.create_task("two").await.expect("create");
    hybrid.start_task(a.id).await.expect("start");
    hybrid.complete_task(b.id).await.expect("complete");

    let open = hybrid.list_tasks(false).await.expect("list");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, a.id);
    assert!(open[0].is_active);

    let all = hybrid.list_tasks(true).await.expect("list all");
    assert_eq!(all.len(), 2);
}
