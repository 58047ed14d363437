pub mod init;
pub mod list;
pub mod shell;
pub mod task;
pub mod theme;

use anyhow::{Context, Result};
use std::env;
use todo_store::persist::JsonFile;
use todo_store::workspace::Workspace;
use todo_store::TaskStore;

pub fn workspace() -> Result<Workspace> {
    let cwd = env::current_dir()?;
    Workspace::discover(&cwd).context("not a todo list (or any parent); run `init` first")
}

pub fn open_store() -> Result<TaskStore<JsonFile>> {
    let ws = workspace()?;
    tracing::debug!(root = %ws.root().display(), "opening todo list");
    ws.store().context("failed to load tasks")
}
