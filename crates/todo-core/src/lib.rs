//! Task model, view parameters and the projection that turns a task list
//! into the sequence a user actually sees.

pub mod error;
pub mod id;
pub mod intent;
pub mod project;
pub mod task;
pub mod theme;
pub mod view;

pub use error::CoreError;
pub use id::TaskId;
pub use intent::Intent;
pub use project::{project, DueStatus, RenderSink, Snapshot, Stats};
pub use task::{Priority, Task, TaskRecord};
pub use theme::Theme;
pub use view::{PriorityFilter, SortMode, StatusFilter, ViewParams};
