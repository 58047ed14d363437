use anyhow::{Context, Result};
use std::env;
use todo_store::workspace::Workspace;

pub fn run() -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let ws = Workspace::init(&cwd).context("failed to initialize todo list")?;
    println!("Initialized empty todo list in {}", ws.tasks_path().display());
    Ok(())
}
