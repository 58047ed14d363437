use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("core error: {0}")]
    Core(#[from] todo_core::error::CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no task matching '{0}'")]
    TaskNotFound(String),

    #[error("ambiguous task prefix '{prefix}': matches {count} tasks")]
    AmbiguousPrefix { prefix: String, count: usize },

    #[error("todo list not found (searched upward from {0})")]
    WorkspaceNotFound(String),

    #[error("todo list already exists at {0}")]
    WorkspaceExists(String),

    #[error("lock file conflict: {0}")]
    LockConflict(String),
}
