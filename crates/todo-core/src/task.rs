use crate::error::CoreError;
use crate::id::TaskId;
use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// low -> medium -> high -> low
    pub fn cycle(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Sort rank for the priority ordering: high first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::InvalidValue {
                kind: "priority",
                value: s.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// A single todo entry.
///
/// Serializes to the persisted record shape
/// `{ id, text, completed, dueDate, priority }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl Task {
    /// Create a task from user input. Returns `None` when the trimmed text is empty.
    pub fn new(text: &str) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self {
            id: TaskId::generate(),
            text,
            completed: false,
            due_date: None,
            priority: Priority::default(),
        })
    }

    /// Whether the trimmed search needle occurs in the text, ignoring case.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim();
        needle.is_empty() || self.text.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Trim user-entered text, rejecting blank input.
pub fn normalize_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// A task as read back from storage, before defaults are filled in.
///
/// Older saved data may lack `id`, `dueDate` or `priority`. Fields that are
/// present but unusable (an empty date, an unknown priority, a `null` text)
/// read as missing rather than failing the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "loose_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose_priority")]
    pub priority: Option<Priority>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Other(#[allow(dead_code)] IgnoredAny),
}

fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Loose>::deserialize(d)? {
        Some(Loose::Text(s)) => Some(s),
        Some(Loose::Other(_)) | None => None,
    })
}

fn loose_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(loose_string(d)?.unwrap_or_default())
}

fn loose_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(loose_string(d)?.and_then(|s| parse_date(&s).ok()))
}

fn loose_priority<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Priority>, D::Error> {
    Ok(loose_string(d)?.and_then(|s| s.parse().ok()))
}

impl TaskRecord {
    /// Fill in defaults. Returns `None` for records with blank text.
    ///
    /// The boolean is `true` when a fresh id had to be generated.
    pub fn into_task(self) -> Option<(Task, bool)> {
        let text = normalize_text(&self.text)?;
        let parsed = self.id.as_deref().and_then(|s| TaskId::parse(s).ok());
        let migrated = parsed.is_none();
        let task = Task {
            id: parsed.unwrap_or_else(TaskId::generate),
            text,
            completed: self.completed,
            due_date: self.due_date,
            priority: self.priority.unwrap_or_default(),
        };
        Some((task, migrated))
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: Some(task.id.as_str().to_string()),
            text: task.text.clone(),
            completed: task.completed,
            due_date: task.due_date,
            priority: Some(task.priority),
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(s.to_string()))
}
