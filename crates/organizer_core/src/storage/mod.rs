pub mod json_store;

use crate::error::AppError;
use crate::model::Task;

/// Whole-collection persistence seam. Implementations re-read durable storage
/// on every `load_all` call rather than caching.
pub trait TaskStore {
    fn load_all(&self) -> Result<Vec<Task>, AppError>;
    fn replace_all(&self, tasks: &[Task]) -> Result<(), AppError>;
}
