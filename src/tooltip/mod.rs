//! Tooltip presentation.
//!
//! Tooltips are the one action kind the walkthrough renders. This module
//! turns the player's current action into a [`TooltipView`] and routes the
//! tooltip's controls back into the [`Player`]. Drawing, positioning maths
//! and animation curves belong to the host; the host reports when an
//! animation settles via [`TooltipInput::AnimationRest`].

mod options;
mod view;

use tracing::trace;

use crate::player::Player;
use crate::surface::Point;

pub use options::{TooltipError, TooltipOptions, TOOLTIP_ACTION};
pub use view::{Control, PageDot, TooltipView};

/// Animation phase of the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipPhase {
    /// Moving to a new anchor (or fading in)
    #[default]
    Appearing,
    /// At rest
    Shown,
    /// Fading out after close; stops playback when settled
    Stopping,
    /// Fading out after finish; finishes playback when settled
    Finishing,
}

/// User and animation events for a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipInput {
    Next,
    Prev,
    /// Pagination dot clicked
    Jump(usize),
    Close,
    Finish,
    /// The running animation settled
    AnimationRest,
}

/// Tooltip state: animation phase and anchor movement.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    phase: TooltipPhase,
    from: Point,
    to: Point,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TooltipPhase {
        self.phase
    }

    /// Anchor movement of the current appearance: `(from, to)`.
    pub fn motion(&self) -> (Point, Point) {
        (self.from, self.to)
    }

    fn is_leaving(&self) -> bool {
        matches!(self.phase, TooltipPhase::Stopping | TooltipPhase::Finishing)
    }

    /// Track the anchor of `view`. A moved anchor restarts the appearance.
    pub fn sync(&mut self, view: &TooltipView) {
        if view.anchor == self.to {
            return;
        }
        self.from = self.to;
        self.to = view.anchor;
        self.phase = TooltipPhase::Appearing;
    }

    /// Apply an input. Navigation is bounded here; the player itself does
    /// not check indexes.
    pub fn handle(&mut self, input: TooltipInput, player: &mut Player) {
        if self.is_leaving() && input != TooltipInput::AnimationRest {
            trace!(?input, phase = ?self.phase, "Ignoring tooltip input while leaving");
            return;
        }

        let index = player.action_index();
        let total = player.total_actions() as isize;

        match input {
            TooltipInput::Next if index + 1 < total => player.advance(),
            TooltipInput::Prev if index > 0 => player.retreat(),
            TooltipInput::Jump(target) => {
                if let Ok(target) = isize::try_from(target) {
                    if target != index && target < total {
                        player.set_action_index(target);
                    }
                }
            }
            TooltipInput::Close => self.phase = TooltipPhase::Stopping,
            TooltipInput::Finish => self.phase = TooltipPhase::Finishing,
            TooltipInput::AnimationRest => self.settle(player),
            TooltipInput::Next | TooltipInput::Prev => {}
        }
    }

    fn settle(&mut self, player: &mut Player) {
        match self.phase {
            TooltipPhase::Appearing => self.phase = TooltipPhase::Shown,
            TooltipPhase::Shown => {}
            TooltipPhase::Stopping => {
                *self = Self::new();
                player.stop();
            }
            TooltipPhase::Finishing => {
                *self = Self::new();
                player.finish();
            }
        }
    }
}
