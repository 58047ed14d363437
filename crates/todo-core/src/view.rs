//! Transient view parameters: what subset of the list is shown, and in
//! which order. None of this is ever persisted.

use crate::error::CoreError;
use crate::task::{Priority, Task};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::InvalidValue {
                kind: "status filter",
                value: s.to_string(),
                expected: "all, active, completed",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => task.priority == p,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(p) => write!(f, "{}", p),
        }
    }
}

impl Serialize for PriorityFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for PriorityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Priority>()
            .map(Self::Only)
            .map_err(|_| CoreError::InvalidValue {
                kind: "priority filter",
                value: s.to_string(),
                expected: "all, low, medium, high",
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Manual,
    Due,
    Priority,
}

impl SortMode {
    /// Toggle `requested` against the current mode.
    ///
    /// `due` and `priority` are two independent on/off switches over
    /// `manual`; turning one on turns the other off.
    pub fn toggle(self, requested: SortMode) -> SortMode {
        if requested == SortMode::Manual || self == requested {
            SortMode::Manual
        } else {
            requested
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Due => "due",
            Self::Priority => "priority",
        }
    }
}

impl FromStr for SortMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "due" => Ok(Self::Due),
            "priority" => Ok(Self::Priority),
            _ => Err(CoreError::InvalidValue {
                kind: "sort mode",
                value: s.to_string(),
                expected: "manual, due, priority",
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewParams {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub search: String,
    pub sort: SortMode,
}

impl ViewParams {
    pub fn accepts(&self, task: &Task) -> bool {
        self.status.accepts(task) && self.priority.accepts(task) && task.matches_search(&self.search)
    }

    /// Drag reordering only makes sense while the manual order is on screen.
    pub fn reorder_enabled(&self) -> bool {
        self.sort == SortMode::Manual
    }
}
