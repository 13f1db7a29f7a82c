mod task;

pub use task::{STATUS_COMPLETED, STATUS_ONGOING, STATUS_PENDING, Task, TaskDraft, TaskPatch};
