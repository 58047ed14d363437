use crate::error::StoreError;
use crate::lockfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use todo_core::theme::Theme;

const SETTINGS_VERSION: u32 = 1;

/// Contents of `.todo/config.json`. Kept apart from the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub theme: Theme,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            created_at: None,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn fresh() -> Self {
        Self {
            created_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Missing or unreadable settings fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            Self::default()
        }))
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        lockfile::write_atomic(path, json.as_bytes())
    }
}
