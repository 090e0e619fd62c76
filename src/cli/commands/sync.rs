use crate::cli::error::CliResult;
use crate::config::ConfigStore;
use crate::db::SqliteDatabase;
use crate::manager::LocalStore;
use crate::remote::{ApiClient, FlowApi};
use crate::sync::SyncEngine;

/// Push local records to the cloud.
pub async fn run(store: &ConfigStore) -> CliResult<String> {
    let settings = store.load();
    let api = ApiClient::from_settings(&settings);
    run_with(&api, store).await
}

pub async fn run_with<A: FlowApi + Sync>(api: &A, store: &ConfigStore) -> CliResult<String> {
    let settings = store.load();
    let db = SqliteDatabase::open(store.db_path()).await?;
    db.migrate().await?;
    let local = LocalStore::new(db, store.clone());
    let user_id = local.ensure_user().await?;

    let report = SyncEngine::new(api, local.db(), &settings)
        .sync_all(user_id)
        .await?;

    let mut out = format!(
        "✓ Synced {} task(s) and {} pomodoro(s)",
        report.tasks_synced, report.pomodoros_synced
    );
    if !report.is_clean() {
        out.push_str(&format!("\n{} record(s) failed:", report.errors.len()));
        for error in &report.errors {
            out.push_str(&format!("\n  {}", error));
        }
    }
    Ok(out)
}
