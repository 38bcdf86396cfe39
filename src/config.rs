//! Runtime options, deserialized from JSON.
//!
//! ```ignore
//! let config = BarkeepConfig::from_json_str(r#"{ "grouping": { "collapse_non_alphabetic": true } }"#)?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Edit session behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Refuse edits and further actions while a discard confirmation is outstanding.
    pub suspend_while_confirming: bool,
    /// Ask before discarding unsaved changes on cancel. When off, cancel reverts immediately.
    pub confirm_discard: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            suspend_while_confirming: true,
            confirm_discard: true,
        }
    }
}

/// List sectioning behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingOptions {
    /// Put every name not starting with a letter into one trailing `#` section.
    pub collapse_non_alphabetic: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarkeepConfig {
    pub session: SessionOptions,
    pub grouping: GroupingOptions,
}

impl BarkeepConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
