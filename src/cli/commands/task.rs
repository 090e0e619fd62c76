use tabled::{Table, Tabled};

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::manager::{DataManager, TaskView};
use crate::remote::FlowApi;

#[derive(Tabled)]
struct TaskDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Task")]
    description: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&TaskView> for TaskDisplay {
    fn from(task: &TaskView) -> Self {
        let status = if task.is_completed {
            "✓ done"
        } else if task.is_active {
            "▶ active"
        } else {
            "pending"
        };
        Self {
            id: task.id,
            description: truncate_with_ellipsis(&task.description, 50),
            status: status.to_string(),
            created: task.created_at.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Add a new task
pub async fn add<A: FlowApi + Sync>(
    manager: &DataManager<A>,
    description: &str,
) -> CliResult<String> {
    let task = manager.create_task(description).await?;
    Ok(format!("✓ Added task: {} (ID {})", task.description, task.id))
}

/// List tasks, open ones by default
pub async fn list<A: FlowApi + Sync>(manager: &DataManager<A>, all: bool) -> CliResult<String> {
    let tasks = manager.list_tasks(all).await?;
    if tasks.is_empty() {
        return Ok("No tasks found. Add one with 'flowstate add <description>'.".to_string());
    }

    let rows: Vec<TaskDisplay> = tasks.iter().map(Into::into).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    Ok(table.to_string())
}

/// Mark a task active; any previously active task goes back to pending
pub async fn start<A: FlowApi + Sync>(manager: &DataManager<A>, id: i64) -> CliResult<String> {
    let task = manager.start_task(id).await?;
    Ok(format!("▶ Started: {} (ID {})", task.description, task.id))
}

/// Complete a task; with no id, completes the active one
pub async fn done<A: FlowApi + Sync>(
    manager: &DataManager<A>,
    id: Option<i64>,
) -> CliResult<String> {
    let id = match id {
        Some(id) => id,
        None => manager
            .get_active_task()
            .await?
            .map(|t| t.id)
            .ok_or_else(|| {
                CliError::invalid_argument(
                    "No active task to complete. Pass a task ID or start one first.",
                )
            })?,
    };

    let task = manager.complete_task(id).await?;
    Ok(format!("✓ Completed: {} (ID {})", task.description, task.id))
}

/// Delete a task (requires --yes for safety)
pub async fn remove<A: FlowApi + Sync>(
    manager: &DataManager<A>,
    id: i64,
    yes: bool,
) -> CliResult<String> {
    if !yes {
        return Err(CliError::invalid_argument(
            "Deleting a task cannot be undone; rerun with --yes to confirm.",
        ));
    }

    manager.delete_task(id).await?;
    Ok(format!("✓ Deleted task {}", id))
}
