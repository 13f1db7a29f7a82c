use crate::error::AppError;
use crate::model::Task;
use crate::storage::TaskStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    tasks: Vec<Task>,
}

/// File-backed store holding the entire task collection in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TASK_ORGANIZER_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::storage("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("task_organizer")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::storage("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("task_organizer")
            .join(STORE_FILE_NAME))
    }
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the env-var override or the per-OS default location.
    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::new(store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the backing file exists; an absent or unreadable file is
    /// replaced with an empty collection.
    pub fn init(&self) -> Result<(), AppError> {
        match load_tasks(&self.path) {
            Ok(_) if self.path.exists() => Ok(()),
            _ => save_tasks(&self.path, &[]),
        }
    }
}

impl TaskStore for JsonStore {
    fn load_all(&self) -> Result<Vec<Task>, AppError> {
        load_tasks(&self.path)
    }

    fn replace_all(&self, tasks: &[Task]) -> Result<(), AppError> {
        save_tasks(&self.path, tasks)
    }
}

fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::storage(err.to_string()))?;
    let stored: StoredTasks =
        serde_json::from_str(&content).map_err(|err| AppError::storage(err.to_string()))?;

    Ok(stored.tasks)
}

fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::storage(err.to_string()))?;
    }

    let stored = StoredTasks {
        tasks: tasks.to_vec(),
    };
    let content =
        serde_json::to_string_pretty(&stored).map_err(|err| AppError::storage(err.to_string()))?;

    // Write to a sibling temp file and rename over the target, so a failed
    // write leaves the previous store intact.
    let tmp_path = temp_sibling(path);
    std::fs::write(&tmp_path, content).map_err(|err| AppError::storage(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&tmp_path, permissions)
            .map_err(|err| AppError::storage(err.to_string()))?;
    }

    std::fs::rename(&tmp_path, path).map_err(|err| {
        std::fs::remove_file(&tmp_path).ok();
        AppError::storage(err.to_string())
    })?;

    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| STORE_FILE_NAME.into());
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
