use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::error::AppError;
use tasklist_core::model::Task;
use tasklist_core::task_api;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const LOCAL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

pub const EMPTY_STATE: &str = "No tasks yet. Add your first one with: tasklist add \"...\"";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// "in 3 days", "2 hours ago", "in less than a minute".
pub fn format_relative(instant: OffsetDateTime, now: OffsetDateTime) -> String {
    let seconds = (instant - now).whole_seconds();
    let (magnitude, future) = if seconds >= 0 {
        (seconds, true)
    } else {
        (-seconds, false)
    };

    let amount = if magnitude < 60 {
        "less than a minute".to_string()
    } else if magnitude < 3600 {
        count_unit(magnitude / 60, "minute")
    } else if magnitude < 86400 {
        count_unit(magnitude / 3600, "hour")
    } else {
        count_unit(magnitude / 86400, "day")
    };

    if future {
        format!("in {amount}")
    } else {
        format!("{amount} ago")
    }
}

fn count_unit(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

pub fn format_local(instant: OffsetDateTime, offset: UtcOffset) -> Result<String, AppError> {
    instant
        .to_offset(offset)
        .format(LOCAL_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn render_table(tasks: &[Task], palette: &Palette) -> Result<String, AppError> {
    render_table_at(
        tasks,
        palette,
        OffsetDateTime::now_utc(),
        task_api::local_offset(),
    )
}

fn render_table_at(
    tasks: &[Task],
    palette: &Palette,
    now: OffsetDateTime,
    offset: UtcOffset,
) -> Result<String, AppError> {
    let mut rows = Vec::with_capacity(tasks.len());
    for task in tasks {
        rows.push(TaskRow {
            id: task.id.clone(),
            text: if task.completed {
                palette.mutedize(&task.text)
            } else {
                task.text.clone()
            },
            status: status_cell(task, now, palette),
            deadline: deadline_cell(task, now, offset, palette)?,
            created: format_local(task.created_at, offset)?,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    Ok(table.to_string())
}

fn status_cell(task: &Task, now: OffsetDateTime, palette: &Palette) -> String {
    if task.completed {
        palette.mutedize("done")
    } else if task_api::is_overdue_at(task, now) {
        palette.accentize("open (overdue)")
    } else {
        "open".to_string()
    }
}

fn deadline_cell(
    task: &Task,
    now: OffsetDateTime,
    offset: UtcOffset,
    palette: &Palette,
) -> Result<String, AppError> {
    let Some(deadline) = task.deadline else {
        return Ok("-".to_string());
    };

    let cell = format!(
        "{} ({})",
        format_relative(deadline, now),
        format_local(deadline, offset)?
    );

    // Overdue styling is display-only and skipped for completed tasks.
    if task_api::is_overdue_at(task, now) && !task.completed {
        Ok(palette.accentize(&cell))
    } else {
        Ok(cell)
    }
}

pub fn summary_line(tasks: &[Task]) -> String {
    let total = tasks.len();
    let remaining = task_api::remaining_count(tasks);
    let noun = if total == 1 { "task" } else { "tasks" };
    format!("{remaining} of {total} {noun} remaining")
}

pub fn task_json(task: &Task) -> Result<String, AppError> {
    serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))
}

/// The raw records plus a computed `overdue` field for each task.
pub fn tasks_json(tasks: &[Task]) -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc();
    let mut payload = Vec::with_capacity(tasks.len());
    for task in tasks {
        let mut value =
            serde_json::to_value(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
        value["overdue"] = serde_json::Value::Bool(task_api::is_overdue_at(task, now));
        payload.push(value);
    }
    Ok(serde_json::Value::Array(payload).to_string())
}
