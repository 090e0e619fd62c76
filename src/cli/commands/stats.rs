use tabled::builder::Builder;

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_minutes};
use crate::manager::DataManager;
use crate::remote::FlowApi;

/// Show the productivity summary.
pub async fn run<A: FlowApi + Sync>(manager: &DataManager<A>) -> CliResult<String> {
    let summary = manager.get_analytics().await?;

    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Pomodoros completed", &summary.total_pomodoros.to_string()]);
    builder.push_record([
        "Tasks done this week",
        &summary.tasks_completed_this_week.to_string(),
    ]);
    builder.push_record([
        "Focus time this week",
        &format_minutes(summary.focus_time_this_week_minutes),
    ]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    Ok(table.to_string())
}
