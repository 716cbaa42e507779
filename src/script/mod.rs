//! Annotated document parser.
//!
//! An annotated document is source text followed by an action script:
//!
//! ```text
//! <body>
//! @@@
//! # comment
//! name: options ::: optional outline
//! ```
//!
//! Parsing is lenient. Blank lines, `#` comments and lines that do not look
//! like `name: options` are dropped. The only failure is an options value
//! that starts with `{` but is not valid JSON.

mod error;
mod lines;
mod unescape;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub use error::ScriptError;
pub use unescape::unescape;

/// Default token splitting the body from the action script.
pub const DEFAULT_SEPARATOR: &str = "@@@";

/// Options attached to an action.
///
/// Options starting with `{` are decoded as JSON, anything else is kept as
/// the raw (unescaped, trimmed) text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOptions {
    Text(String),
    Structured(serde_json::Value),
}

impl ActionOptions {
    /// Structured value, if the options were written as a JSON object.
    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Raw text, if the options were not structured.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

impl From<serde_json::Value> for ActionOptions {
    fn from(value: serde_json::Value) -> Self {
        Self::Structured(value)
    }
}

impl From<&str> for ActionOptions {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One step of a walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Identifier before the colon (`tooltip`, ...)
    pub name: String,
    /// Decoded options
    pub options: ActionOptions,
    /// Text of a trailing ` ::: outline` annotation, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
}

impl Action {
    pub fn new(name: impl Into<String>, options: impl Into<ActionOptions>) -> Self {
        Self {
            name: name.into(),
            options: options.into(),
            outline: None,
        }
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = Some(outline.into());
        self
    }
}

/// Result of splitting an annotated document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Body text, trimmed and unescaped
    pub source: String,
    /// Actions in script order
    pub actions: Vec<Action>,
}

impl ParsedDocument {
    pub fn new(source: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            source: source.into(),
            actions,
        }
    }

    /// Outline labels with the index of the action they belong to.
    pub fn outline(&self) -> Vec<(usize, &str)> {
        self.actions
            .iter()
            .enumerate()
            .filter_map(|(i, action)| action.outline.as_deref().map(|label| (i, label)))
            .collect()
    }
}

/// Parse an annotated document using the default `@@@` separator.
pub fn parse(text: &str) -> Result<ParsedDocument, ScriptError> {
    parse_with_separator(text, DEFAULT_SEPARATOR)
}

/// Parse an annotated document split by `separator`.
///
/// Only the first two sections are used; text after a second separator is
/// ignored.
pub fn parse_with_separator(text: &str, separator: &str) -> Result<ParsedDocument, ScriptError> {
    if separator.is_empty() {
        return Err(ScriptError::EmptySeparator);
    }

    let mut sections = text.split(separator);
    let body = sections.next().unwrap_or_default();
    let script = sections.next().unwrap_or_default();

    Ok(ParsedDocument {
        source: unescape(body.trim()),
        actions: parse_actions(script)?,
    })
}

/// Parse the action script section on its own.
pub fn parse_actions(script: &str) -> Result<Vec<Action>, ScriptError> {
    let script = lines::normalize_newlines(script);
    let mut actions = Vec::new();

    for (line_idx, raw) in script.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (line, outline) = lines::strip_outline(line);
        let Some((name, remainder)) = lines::match_command(line) else {
            trace!(line = line_idx + 1, "Dropping script line without command shape");
            continue;
        };

        let remainder = unescape(remainder);
        let options = if remainder.starts_with('{') {
            let value = serde_json::from_str(&remainder).map_err(|source| {
                ScriptError::InvalidOptions {
                    line: line_idx + 1,
                    name: name.to_string(),
                    source,
                }
            })?;
            ActionOptions::Structured(value)
        } else {
            ActionOptions::Text(remainder)
        };

        actions.push(Action {
            name: name.to_string(),
            options,
            outline: outline.map(str::to_string),
        });
    }

    Ok(actions)
}
