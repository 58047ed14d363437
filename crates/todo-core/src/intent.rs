use crate::id::TaskId;
use crate::theme::Theme;
use crate::view::{PriorityFilter, SortMode, StatusFilter};
use chrono::NaiveDate;

/// A discrete user intent reported by an edit surface.
///
/// Intents are dispatched into the task store one at a time; each is fully
/// handled (mutate, persist, project, render) before the next arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    ToggleComplete(TaskId),
    EditText(TaskId, String),
    SetDueDate(TaskId, Option<NaiveDate>),
    CyclePriority(TaskId),
    Remove(TaskId),
    ClearCompleted,
    Reorder { dragged: TaskId, target: TaskId },
    SetStatusFilter(StatusFilter),
    SetPriorityFilter(PriorityFilter),
    SetSearch(String),
    ToggleSort(SortMode),
    SetTheme(Theme),
}

impl Intent {
    /// Whether this intent changes the task list (and therefore persists).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Add(_)
                | Self::ToggleComplete(_)
                | Self::EditText(..)
                | Self::SetDueDate(..)
                | Self::CyclePriority(_)
                | Self::Remove(_)
                | Self::ClearCompleted
                | Self::Reorder { .. }
        )
    }

    /// Task ids referenced by this intent, for prefix resolution.
    pub fn ids_mut(&mut self) -> Vec<&mut TaskId> {
        match self {
            Self::ToggleComplete(id)
            | Self::EditText(id, _)
            | Self::SetDueDate(id, _)
            | Self::CyclePriority(id)
            | Self::Remove(id) => vec![id],
            Self::Reorder { dragged, target } => vec![dragged, target],
            _ => Vec::new(),
        }
    }
}
