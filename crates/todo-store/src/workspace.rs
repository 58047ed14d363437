use crate::error::StoreError;
use crate::lockfile;
use crate::persist::JsonFile;
use crate::settings::Settings;
use crate::store::TaskStore;
use std::fs;
use std::path::{Path, PathBuf};

const TODO_DIR: &str = ".todo";
const TASKS_FILE: &str = "tasks.json";
const SETTINGS_FILE: &str = "config.json";

/// A `.todo/` directory holding the task list and its settings.
///
/// Layout:
/// - `tasks.json`  — JSON array of task records
/// - `config.json` — [`Settings`] (theme preference)
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create `.todo/` under `path` with an empty list and default settings.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let todo_dir = root.join(TODO_DIR);

        if todo_dir.exists() {
            return Err(StoreError::WorkspaceExists(todo_dir.display().to_string()));
        }
        fs::create_dir_all(&todo_dir)?;

        let ws = Self { root };
        Settings::fresh().save(&ws.settings_path())?;
        lockfile::write_atomic(ws.tasks_path(), b"[]")?;
        tracing::debug!(path = %todo_dir.display(), "initialized todo list");
        Ok(ws)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        if !root.join(TODO_DIR).is_dir() {
            return Err(StoreError::WorkspaceNotFound(root.display().to_string()));
        }
        Ok(Self { root })
    }

    /// Search upward from `start` for a `.todo/` directory.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut current = start.as_ref().to_path_buf();
        loop {
            if current.join(TODO_DIR).is_dir() {
                return Self::open(&current);
            }
            if !current.pop() {
                return Err(StoreError::WorkspaceNotFound(
                    start.as_ref().display().to_string(),
                ));
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.root.join(TODO_DIR).join(TASKS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(TODO_DIR).join(SETTINGS_FILE)
    }

    /// Load the task store backed by `tasks.json`.
    pub fn store(&self) -> Result<TaskStore<JsonFile>, StoreError> {
        TaskStore::load(JsonFile::new(self.tasks_path()))
    }

    pub fn settings(&self) -> Result<Settings, StoreError> {
        Settings::load(&self.settings_path())
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        settings.save(&self.settings_path())
    }
}
