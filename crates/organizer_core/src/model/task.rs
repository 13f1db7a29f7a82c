use serde::{Deserialize, Serialize};

/// Conventional status values. The field itself stays free-form, so loads
/// never reject a status outside this set.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ONGOING: &str = "ongoing";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "taskID")]
    pub task_id: String,
    pub name: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub status: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// Caller-supplied fields for a new task. The identifier is generated by the
/// service, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub status: String,
    pub category: String,
}

/// Partial update for an existing task; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.category.is_none()
    }
}
