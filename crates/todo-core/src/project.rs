//! View projection: (task list, view parameters) -> visible sequence.
//!
//! Filtering is status, then priority, then search, and every filter keeps
//! the manual order. The sort runs last and is stable, so tasks with equal
//! keys never swap places between renders.

use crate::task::Task;
use crate::view::{SortMode, ViewParams};
use chrono::NaiveDate;
use serde::Serialize;

/// Compute the visible, ordered sequence of tasks.
pub fn project<'a>(tasks: &'a [Task], view: &ViewParams) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| view.accepts(t))
        .collect();

    match view.sort {
        SortMode::Manual => {}
        // Undated tasks go after every dated one.
        SortMode::Due => visible.sort_by_key(|t| (t.due_date.is_none(), t.due_date)),
        SortMode::Priority => visible.sort_by_key(|t| t.priority.rank()),
    }
    visible
}

/// Counts over the full, unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl Stats {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            active: total - completed,
            completed,
        }
    }
}

pub fn has_completed(tasks: &[Task]) -> bool {
    tasks.iter().any(|t| t.completed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    None,
}

impl DueStatus {
    /// Date-only comparison against `today`. Completed tasks are never flagged.
    pub fn classify(task: &Task, today: NaiveDate) -> Self {
        match task.due_date {
            _ if task.completed => Self::None,
            Some(due) if due < today => Self::Overdue,
            Some(due) if due == today => Self::DueToday,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub due_status: DueStatus,
}

/// Everything a render sink needs for one render cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tasks: Vec<Entry<'a>>,
    pub stats: Stats,
    pub has_completed: bool,
    pub is_empty: bool,
    pub reorder_enabled: bool,
    pub view: &'a ViewParams,
}

impl<'a> Snapshot<'a> {
    pub fn build(tasks: &'a [Task], view: &'a ViewParams, today: NaiveDate) -> Self {
        let entries: Vec<Entry<'a>> = project(tasks, view)
            .into_iter()
            .map(|task| Entry {
                task,
                due_status: DueStatus::classify(task, today),
            })
            .collect();
        Self {
            is_empty: entries.is_empty(),
            tasks: entries,
            stats: Stats::of(tasks),
            has_completed: has_completed(tasks),
            reorder_enabled: view.reorder_enabled(),
            view,
        }
    }
}

/// Something that reflects a snapshot to the user.
///
/// Implementations redraw from the snapshot alone; no diffing against the
/// previous render is expected.
pub trait RenderSink {
    type Error;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<(), Self::Error>;
}
