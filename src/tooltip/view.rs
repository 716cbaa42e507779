//! Display values for the current tooltip.

use super::options::{TooltipError, TooltipOptions, TOOLTIP_ACTION};
use crate::player::{Player, Status};
use crate::surface::{LineCol, Point};

/// Control shown at the trailing end of the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Next,
    Finish,
}

/// One pagination dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDot {
    pub index: usize,
    /// The current step; not clickable
    pub active: bool,
}

/// Everything a renderer needs to draw the current tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    pub text: String,
    pub pos: LineCol,
    /// Screen coordinates of `pos`, as reported by the surface
    pub anchor: Point,
    pub index: usize,
    pub total: usize,
}

impl TooltipView {
    /// View for the player's current action.
    ///
    /// `None` while idle, at sentinel indexes, or when the current action is
    /// not a tooltip.
    pub fn for_player(player: &Player) -> Result<Option<Self>, TooltipError> {
        if player.status() == Status::Idle {
            return Ok(None);
        }

        let Some(action) = player.current_action() else {
            return Ok(None);
        };
        if action.name != TOOLTIP_ACTION {
            return Ok(None);
        }

        let options = TooltipOptions::from_action(action)?;
        // current_action() only succeeds for 0 <= index < total
        let index = player.action_index().unsigned_abs();

        Ok(Some(Self {
            anchor: player.cursor_coords(options.pos),
            text: options.text,
            pos: options.pos,
            index,
            total: player.total_actions(),
        }))
    }

    /// `"2/4"` style progress label.
    pub fn step_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.total)
    }

    /// Progress label and pagination are hidden for single-step walkthroughs.
    pub fn show_steps(&self) -> bool {
        self.total > 1
    }

    pub fn show_prev(&self) -> bool {
        self.index > 0
    }

    pub fn trailing_control(&self) -> Control {
        if self.index + 1 < self.total {
            Control::Next
        } else {
            Control::Finish
        }
    }

    pub fn pagination(&self) -> Vec<PageDot> {
        (0..self.total)
            .map(|index| PageDot {
                index,
                active: index == self.index,
            })
            .collect()
    }
}
