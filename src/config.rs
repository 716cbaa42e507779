//! Player configuration.
//!
//! Defaults mirror what a host gets without any configuration; a TOML file
//! only needs to name the fields it overrides:
//!
//! ```toml
//! separator = "---8<---"
//!
//! [editor]
//! theme = "monokai"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::script::DEFAULT_SEPARATOR;

/// Errors from validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Section separator must not be empty")]
    EmptySeparator,

    #[error("Section separator must fit on one line (got {0:?})")]
    MultilineSeparator(String),

    #[error("Editor mode must not be empty")]
    EmptyMode,
}

/// Options handed to the editor widget when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorOptions {
    /// Syntax mode (MIME type or mode name)
    pub mode: String,
    /// Color theme name
    pub theme: String,
    pub line_numbers: bool,
    pub line_wrapping: bool,
    /// Read-only while idle. Playback forces read-only regardless.
    pub read_only: bool,
    pub auto_refresh: bool,
    pub show_cursor_when_selecting: bool,
    /// Swallow key and mouse input while read-only
    pub prevent_cursor_movement: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            mode: "text/x-java".to_string(),
            theme: "seti".to_string(),
            line_numbers: true,
            line_wrapping: true,
            read_only: false,
            auto_refresh: true,
            show_cursor_when_selecting: false,
            prevent_cursor_movement: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Token separating source text from the action script
    pub separator: String,
    pub editor: EditorOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            editor: EditorOptions::default(),
        }
    }
}

impl Config {
    /// Check the invariants every constructor relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        if self.separator.contains(['\n', '\r']) {
            return Err(ConfigError::MultilineSeparator(self.separator.clone()));
        }
        if self.editor.mode.trim().is_empty() {
            return Err(ConfigError::EmptyMode);
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        debug!(path = %path.display(), separator = %config.separator, "Loaded config");
        Ok(config)
    }

    /// Serialize as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
