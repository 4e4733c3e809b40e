use crate::error::AppError;
use crate::model::Task;
use crate::storage::json_store;
use std::path::Path;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use uuid::Uuid;

const DATE_TIME_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_TIME_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn add_task(text: &str, deadline: Option<OffsetDateTime>) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    add_task_with_path(&path, text, deadline)
}

pub fn toggle_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    toggle_task_with_path(&path, id)
}

pub fn delete_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    delete_task_with_path(&path, id)
}

pub fn list_tasks() -> Result<Vec<Task>, AppError> {
    let path = json_store::store_path()?;
    json_store::load_tasks(&path)
}

fn add_task_with_path(
    path: &Path,
    text: &str,
    deadline: Option<OffsetDateTime>,
) -> Result<Task, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("text is required"));
    }

    let task = Task {
        id: Uuid::new_v4().to_string(),
        text: trimmed.to_string(),
        completed: false,
        deadline,
        created_at: OffsetDateTime::now_utc(),
    };

    let mut tasks = json_store::load_tasks(path)?;
    tasks.insert(0, task.clone());
    json_store::save_tasks(path, &tasks)?;

    Ok(task)
}

fn toggle_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut tasks = json_store::load_tasks(path)?;
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == trimmed_id {
            task.completed = !task.completed;
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| AppError::invalid_input("task not found"))?;
    json_store::save_tasks(path, &tasks)?;

    Ok(updated)
}

fn delete_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut tasks = json_store::load_tasks(path)?;
    let index = tasks
        .iter()
        .position(|task| task.id == trimmed_id)
        .ok_or_else(|| AppError::invalid_input("task not found"))?;

    let removed = tasks.remove(index);
    json_store::save_tasks(path, &tasks)?;

    Ok(removed)
}

pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| !task.completed).count()
}

/// True iff the task has a deadline strictly before `now`. Completion is
/// ignored here; the renderer decides how to show a completed overdue task.
pub fn is_overdue_at(task: &Task, now: OffsetDateTime) -> bool {
    task.deadline.is_some_and(|deadline| now > deadline)
}

pub fn task_overdue(task: &Task) -> bool {
    is_overdue_at(task, OffsetDateTime::now_utc())
}

pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Parses a user-supplied deadline. Accepts RFC3339, or a local
/// `YYYY-MM-DD HH:MM[:SS]` (a `T` separator also works), or a bare
/// `YYYY-MM-DD` which means midnight local time.
pub fn parse_deadline(raw: &str) -> Result<OffsetDateTime, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("deadline is required"));
    }

    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(parsed);
    }

    let offset = local_offset();
    let normalized = trimmed.replacen('T', " ", 1);
    for format in [DATE_TIME_SECONDS, DATE_TIME_MINUTES] {
        if let Ok(parsed) = PrimitiveDateTime::parse(&normalized, format) {
            return Ok(parsed.assume_offset(offset));
        }
    }

    if let Ok(date) = Date::parse(trimmed, DATE_ONLY) {
        return Ok(date.midnight().assume_offset(offset));
    }

    Err(AppError::invalid_input(
        "deadline must be RFC3339, YYYY-MM-DD HH:MM[:SS], or YYYY-MM-DD",
    ))
}
