use crate::error::AppError;
use crate::model::{STATUS_COMPLETED, Task, TaskDraft, TaskPatch};
use crate::storage::TaskStore;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// The wall clock alone can repeat within one coarse tick, so ids carry a
// per-process sequence number as well.
static ID_SEQ: AtomicU64 = AtomicU64::new(0);

fn generate_task_id() -> String {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let seq = ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("task-{nanos}-{seq}")
}

fn now_rfc3339() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_input(err.to_string()))
}

/// Resolve a raw index argument against the current collection length.
/// Indices are base-10; anything non-numeric, negative, or past the end is
/// `index_out_of_range`.
fn resolve_index(raw: &str, len: usize) -> Result<usize, AppError> {
    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| AppError::index_out_of_range(format!("invalid index: {raw}")))?;

    if index >= len {
        return Err(AppError::index_out_of_range(format!(
            "index {index} out of range for {len} task(s)"
        )));
    }

    Ok(index)
}

/// Append a new task with a generated id. Status and `completed_at` are taken
/// exactly as supplied; `add` never stamps a completion time.
pub fn add_task(store: &dyn TaskStore, draft: TaskDraft) -> Result<Task, AppError> {
    let task = Task {
        task_id: generate_task_id(),
        name: draft.name,
        description: draft.description,
        due_date: draft.due_date,
        priority: draft.priority,
        status: draft.status,
        category: draft.category,
        completed_at: None,
    };

    let mut tasks = store.load_all()?;
    tasks.push(task.clone());
    store.replace_all(&tasks)?;

    Ok(task)
}

pub fn get_tasks(store: &dyn TaskStore) -> Result<Vec<Task>, AppError> {
    store.load_all()
}

pub fn get_task(store: &dyn TaskStore, raw_index: &str) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let index = resolve_index(raw_index, tasks.len())?;
    Ok(tasks.remove(index))
}

/// Merge the patch over the task at the given position. The identifier is
/// never overwritten. May set status to "completed" without stamping
/// `completed_at`; only `mark_done` does that.
pub fn update_task(
    store: &dyn TaskStore,
    raw_index: &str,
    patch: &TaskPatch,
) -> Result<Task, AppError> {
    if patch.is_empty() {
        return Err(AppError::invalid_input("no fields to update"));
    }

    let mut tasks = store.load_all()?;
    let index = resolve_index(raw_index, tasks.len())?;
    let task = &mut tasks[index];

    if let Some(name) = &patch.name {
        task.name = name.clone();
    }
    if let Some(description) = &patch.description {
        task.description = description.clone();
    }
    if let Some(due_date) = &patch.due_date {
        task.due_date = due_date.clone();
    }
    if let Some(priority) = &patch.priority {
        task.priority = priority.clone();
    }
    if let Some(status) = &patch.status {
        task.status = status.clone();
    }
    if let Some(category) = &patch.category {
        task.category = category.clone();
    }

    let updated = task.clone();
    store.replace_all(&tasks)?;

    Ok(updated)
}

/// Remove the task at the given position; later positions shift down by one.
pub fn delete_task(store: &dyn TaskStore, raw_index: &str) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let index = resolve_index(raw_index, tasks.len())?;
    let removed = tasks.remove(index);
    store.replace_all(&tasks)?;

    Ok(removed)
}

/// One-way transition to "completed"; stamps `completed_at` with the current
/// time. Completing an already-completed task is an error.
pub fn mark_done(store: &dyn TaskStore, raw_index: &str) -> Result<Task, AppError> {
    let mut tasks = store.load_all()?;
    let index = resolve_index(raw_index, tasks.len())?;
    let task = &mut tasks[index];

    if task.status == STATUS_COMPLETED {
        return Err(AppError::already_completed(
            "task is already marked as completed",
        ));
    }

    task.status = STATUS_COMPLETED.to_string();
    task.completed_at = Some(now_rfc3339()?);

    let updated = task.clone();
    store.replace_all(&tasks)?;

    Ok(updated)
}
