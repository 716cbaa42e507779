//! Annotation script errors.

/// Errors raised while splitting an annotated document.
///
/// Malformed lines are not errors: they are dropped. Only structured
/// options that fail to decode abort the parse.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Invalid options for action '{name}' on script line {line}: {source}")]
    InvalidOptions {
        line: usize,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Section separator must not be empty")]
    EmptySeparator,
}
