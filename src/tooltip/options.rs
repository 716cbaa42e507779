//! Tooltip action options.

use serde::Deserialize;

use crate::script::Action;
use crate::surface::{LineCol, ParseLineColError};

/// Name of the action rendered as a tooltip.
pub const TOOLTIP_ACTION: &str = "tooltip";

/// Errors decoding a tooltip action.
#[derive(Debug, thiserror::Error)]
pub enum TooltipError {
    #[error("Action '{name}' has plain-text options; tooltips need a JSON object")]
    NotStructured { name: String },

    #[error("Invalid tooltip options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidPosition(#[from] ParseLineColError),
}

#[derive(Debug, Deserialize)]
struct RawOptions {
    text: String,
    pos: String,
}

/// Decoded `tooltip` options: `{"text": "...", "pos": "line:ch"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipOptions {
    pub text: String,
    pub pos: LineCol,
}

impl TooltipOptions {
    pub fn from_action(action: &Action) -> Result<Self, TooltipError> {
        let value = action
            .options
            .as_structured()
            .ok_or_else(|| TooltipError::NotStructured {
                name: action.name.clone(),
            })?;

        let raw = RawOptions::deserialize(value)?;
        Ok(Self {
            text: raw.text,
            pos: raw.pos.parse()?,
        })
    }
}
