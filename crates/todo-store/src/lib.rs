//! Persistent state for the todo list: the task store, its storage
//! backends, and the on-disk `.todo/` workspace.

pub mod error;
pub mod lockfile;
pub mod persist;
pub mod settings;
pub mod store;
pub mod workspace;

pub use error::StoreError;
pub use store::{Outcome, TaskStore};
