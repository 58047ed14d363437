use crate::error::StoreError;
use crate::persist::Persistence;
use chrono::NaiveDate;
use std::collections::HashSet;
use todo_core::id::TaskId;
use todo_core::intent::Intent;
use todo_core::project::Snapshot;
use todo_core::task::{normalize_text, Task};
use todo_core::view::{PriorityFilter, SortMode, StatusFilter, ViewParams};

/// Result of dispatching one intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The task list was written to the backend.
    pub persisted: bool,
    /// Id of the task created by an `Add`.
    pub added: Option<TaskId>,
}

/// Sole owner of the task list and the current view parameters.
///
/// Every operation that changes the list saves the whole list before it
/// returns. Unknown ids are silent no-ops and save nothing; bad text is
/// normalized or ignored rather than reported.
pub struct TaskStore<P: Persistence> {
    tasks: Vec<Task>,
    view: ViewParams,
    persistence: P,
}

impl<P: Persistence> TaskStore<P> {
    /// Build the store from whatever the backend holds.
    ///
    /// Records without a usable id (older data), or repeating an earlier id,
    /// get a fresh one; the migrated list is saved once so ids stay stable.
    pub fn load(mut persistence: P) -> Result<Self, StoreError> {
        let records = persistence.load()?.unwrap_or_default();
        let mut seen = HashSet::new();
        let mut migrated = 0usize;
        let mut tasks = Vec::with_capacity(records.len());

        for record in records {
            let Some((mut task, fresh)) = record.into_task() else {
                continue;
            };
            if !seen.insert(task.id.clone()) {
                task.id = TaskId::generate();
                seen.insert(task.id.clone());
                migrated += 1;
            } else if fresh {
                migrated += 1;
            }
            tasks.push(task);
        }

        if migrated > 0 {
            tracing::info!(count = migrated, "assigned ids to stored tasks");
            persistence.save(&tasks)?;
        }

        Ok(Self {
            tasks,
            view: ViewParams::default(),
            persistence,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view(&self) -> &ViewParams {
        &self.view
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    fn persist(&mut self, op: &'static str) -> Result<(), StoreError> {
        tracing::debug!(op, tasks = self.tasks.len(), "saving task list");
        self.persistence.save(&self.tasks)
    }

    /// Apply `f` to the task with `id` and persist. `Ok(false)` if not found.
    fn update(
        &mut self,
        id: &TaskId,
        op: &'static str,
        f: impl FnOnce(&mut Task),
    ) -> Result<bool, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| &t.id == id) else {
            tracing::debug!(op, id = %id, "no such task");
            return Ok(false);
        };
        f(task);
        self.persist(op)?;
        Ok(true)
    }

    // --- List mutations ---

    /// Append a new task. Blank text is ignored and nothing is saved.
    pub fn add(&mut self, text: &str) -> Result<Option<TaskId>, StoreError> {
        let Some(task) = Task::new(text) else {
            return Ok(None);
        };
        let id = task.id.clone();
        self.tasks.push(task);
        self.persist("add")?;
        Ok(Some(id))
    }

    pub fn toggle_complete(&mut self, id: &TaskId) -> Result<bool, StoreError> {
        self.update(id, "toggle", |t| t.completed = !t.completed)
    }

    /// Replace the text. Blank text cancels the edit but the list is still
    /// saved.
    pub fn edit_text(&mut self, id: &TaskId, text: &str) -> Result<bool, StoreError> {
        let text = normalize_text(text);
        self.update(id, "edit", |t| {
            if let Some(text) = text {
                t.text = text;
            }
        })
    }

    pub fn set_due_date(
        &mut self,
        id: &TaskId,
        due: Option<NaiveDate>,
    ) -> Result<bool, StoreError> {
        self.update(id, "due", |t| t.due_date = due)
    }

    pub fn cycle_priority(&mut self, id: &TaskId) -> Result<bool, StoreError> {
        self.update(id, "priority", |t| t.priority = t.priority.cycle())
    }

    pub fn remove(&mut self, id: &TaskId) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        self.tasks.remove(index);
        self.persist("remove")?;
        Ok(true)
    }

    /// Drop every completed task; the rest keep their relative order.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        self.persist("clear_completed")?;
        Ok(before - self.tasks.len())
    }

    /// Move `dragged` into the slot `target` occupies.
    ///
    /// Only allowed while the manual order is displayed. Dragging upward
    /// lands the task directly before `target`; dragging downward lands it
    /// directly after, so reversing a move restores the original order.
    pub fn reorder(&mut self, dragged: &TaskId, target: &TaskId) -> Result<bool, StoreError> {
        if !self.view.reorder_enabled() {
            tracing::debug!(sort = self.view.sort.as_str(), "reorder ignored outside manual sort");
            return Ok(false);
        }
        if dragged == target {
            return Ok(false);
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return Ok(false);
        };
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.persist("reorder")?;
        Ok(true)
    }

    // --- View parameters (never persisted) ---

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.view.status = status;
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.view.priority = priority;
    }

    pub fn set_search(&mut self, search: &str) {
        self.view.search = search.to_string();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.view.sort = sort;
    }

    /// Flip `mode` on or off; see [`SortMode::toggle`].
    pub fn toggle_sort(&mut self, mode: SortMode) -> SortMode {
        self.view.sort = self.view.sort.toggle(mode);
        self.view.sort
    }

    // --- Dispatch ---

    /// Resolve a full id or unique prefix to a task id.
    pub fn find(&self, prefix: &str) -> Result<TaskId, StoreError> {
        let prefix = prefix.trim();
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == prefix) {
            return Ok(task.id.clone());
        }
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| !prefix.is_empty() && t.id.starts_with(prefix))
            .collect();
        match matches.as_slice() {
            [] => Err(StoreError::TaskNotFound(prefix.to_string())),
            [task] => Ok(task.id.clone()),
            _ => Err(StoreError::AmbiguousPrefix {
                prefix: prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// Expand every id prefix in `intent` to a full id.
    pub fn resolve(&self, intent: &mut Intent) -> Result<(), StoreError> {
        for slot in intent.ids_mut() {
            *slot = self.find(slot.as_str())?;
        }
        Ok(())
    }

    /// Dispatch one intent. `SetTheme` is not a store concern and is ignored.
    pub fn apply(&mut self, intent: Intent) -> Result<Outcome, StoreError> {
        let persisted = match intent {
            Intent::Add(text) => {
                let added = self.add(&text)?;
                return Ok(Outcome {
                    persisted: added.is_some(),
                    added,
                });
            }
            Intent::ToggleComplete(id) => self.toggle_complete(&id)?,
            Intent::EditText(id, text) => self.edit_text(&id, &text)?,
            Intent::SetDueDate(id, due) => self.set_due_date(&id, due)?,
            Intent::CyclePriority(id) => self.cycle_priority(&id)?,
            Intent::Remove(id) => self.remove(&id)?,
            Intent::ClearCompleted => {
                self.clear_completed()?;
                true
            }
            Intent::Reorder { dragged, target } => self.reorder(&dragged, &target)?,
            Intent::SetStatusFilter(status) => {
                self.set_status_filter(status);
                false
            }
            Intent::SetPriorityFilter(priority) => {
                self.set_priority_filter(priority);
                false
            }
            Intent::SetSearch(search) => {
                self.set_search(&search);
                false
            }
            Intent::ToggleSort(mode) => {
                self.toggle_sort(mode);
                false
            }
            Intent::SetTheme(_) => false,
        };
        Ok(Outcome {
            persisted,
            added: None,
        })
    }

    /// Project the current list through the current view.
    pub fn snapshot(&self, today: NaiveDate) -> Snapshot<'_> {
        Snapshot::build(&self.tasks, &self.view, today)
    }
}
