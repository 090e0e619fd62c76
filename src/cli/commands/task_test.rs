use tempfile::TempDir;

use super::task;
use crate::cli::error::CliError;
use crate::config::ConfigStore;
use crate::db::SqliteDatabase;
use crate::manager::{DataManager, LocalStore};
use crate::remote::stub::StubApi;

async fn local_manager() -> (DataManager<StubApi>, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = ConfigStore::open(tmp.path()).expect("config store");
    let db = SqliteDatabase::in_memory().await.expect("db");
    db.migrate().await.expect("migrate");
    (DataManager::Local(LocalStore::new(db, config)), tmp)
}

#[tokio::test(flavor = "multi_thread")]
async fn add_reports_the_new_task() {
    let (manager, _tmp) = local_manager().await;

    let output = task::add(&manager, "write the quarterly report")
        .await
        .expect("add");

    assert!(output.contains("✓ Added task: write the quarterly report"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_hides_completed_tasks_by_default() {
    let (manager, _tmp) = local_manager().await;
    task::add(&manager, "open task").await.expect("add");
    task::add(&manager, "finished task").await.expect("add");
    task::done(&manager, Some(2)).await.expect("done");

    let open_only = task::list(&manager, false).await.expect("list");
    assert!(open_only.contains("open task"));
    assert!(!open_only.contains("finished task"));

    let everything = task::list(&manager, true).await.expect("list all");
    assert!(everything.contains("finished task"));
    assert!(everything.contains("✓ done"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_list_suggests_adding_a_task() {
    let (manager, _tmp) = local_manager().await;

    let output = task::list(&manager, false).await.expect("list");

    assert!(output.contains("No tasks found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn done_without_id_completes_the_active_task() {
    let (manager, _tmp) = local_manager().await;
    task::add(&manager, "focus target").await.expect("add");
    task::start(&manager, 1).await.expect("start");

    let output = task::done(&manager, None).await.expect("done");

    assert!(output.contains("✓ Completed: focus target"));
}

#[tokio::test(flavor = "multi_thread")]
async fn done_without_id_or_active_task_errors() {
    let (manager, _tmp) = local_manager().await;
    task::add(&manager, "never started").await.expect("add");

    let result = task::done(&manager, None).await;

    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn rm_requires_the_yes_flag() {
    let (manager, _tmp) = local_manager().await;
    task::add(&manager, "precious").await.expect("add");

    let refused = task::remove(&manager, 1, false).await;
    assert!(matches!(refused, Err(CliError::InvalidArgument { .. })));

    let output = task::remove(&manager, 1, true).await.expect("remove");
    assert!(output.contains("✓ Deleted task 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_id_surfaces_not_found() {
    let (manager, _tmp) = local_manager().await;

    let result = task::start(&manager, 404).await;

    match result {
        Err(CliError::Manager(e)) => assert!(e.is_not_found()),
        other => panic!("expected a not-found error, got {:?}", other.map(|_| ())),
    }
}
