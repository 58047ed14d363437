//! Storage backends for the task list.
//!
//! A backend only ever sees the full list: `save` writes every task, `load`
//! returns whatever was last written (or `None` when nothing usable is
//! stored). View parameters are never handed to a backend.

use crate::error::StoreError;
use crate::lockfile;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use todo_core::task::{Task, TaskRecord};

pub trait Persistence {
    /// Read the stored records. `Ok(None)` means "no prior data".
    fn load(&self) -> Result<Option<Vec<TaskRecord>>, StoreError>;

    /// Replace the stored records with `tasks`.
    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// Pretty-printed JSON array of task records in a single file.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFile {
    fn load(&self) -> Result<Option<Vec<TaskRecord>>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if data.trim().is_empty() {
            return Ok(None);
        }
        let values = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&data) {
            Ok(Some(values)) => values,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "ignoring malformed task file"
                );
                return Ok(None);
            }
        };

        // A record that cannot be read is skipped; the rest of the list survives.
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<TaskRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "skipping malformed task record"
                    );
                    None
                }
            })
            .collect();
        Ok(Some(records))
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        lockfile::write_atomic(&self.path, json.as_bytes())
    }
}

/// In-process backend. Counts saves so callers can tell whether an
/// operation wrote anything.
#[derive(Debug, Default)]
pub struct Memory {
    records: Option<Vec<TaskRecord>>,
    saves: usize,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        Self {
            records: Some(records),
            saves: 0,
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn records(&self) -> Option<&[TaskRecord]> {
        self.records.as_deref()
    }
}

impl Persistence for Memory {
    fn load(&self) -> Result<Option<Vec<TaskRecord>>, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        self.records = Some(tasks.iter().map(TaskRecord::from).collect());
        self.saves += 1;
        Ok(())
    }
}
