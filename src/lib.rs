//! Scripted code walkthroughs.
//!
//! A walkthrough is a piece of source text followed by a small action
//! script, separated by a marker (`@@@` by default):
//!
//! ```text
//! String email = request.getParameter("email");
//! @@@
//! # comments and blank lines are ignored
//! tooltip: {"text": "Reads the email parameter", "pos": "0:8"}
//! ```
//!
//! - [`script`]: splits annotated text into the clean source and the action list
//! - [`player`]: the playback state machine driving an [`EditingSurface`]
//! - [`tooltip`]: presentation model for `tooltip` actions
//! - [`config`]: separator and editor options, loadable from TOML
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use code_movie::{Config, MemorySurface, Player, TooltipView, VirtualClock};
//!
//! # fn main() -> anyhow::Result<()> {
//! let clock = VirtualClock::new();
//! let mut player = Player::new(
//!     Config::default(),
//!     Box::new(MemorySurface::new()),
//!     Box::new(()),
//!     Box::new(clock.clone()),
//! )?;
//! player.load_annotated("let x = 1;\n@@@\ntooltip: {\"text\": \"hi\", \"pos\": \"0:4\"}")?;
//! player.play();
//!
//! if let Some(view) = TooltipView::for_player(&player)? {
//!     println!("{} ({})", view.text, view.step_label());
//! }
//! clock.run_for(&mut player, Duration::from_millis(16));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod player;
pub mod script;
pub mod surface;
pub mod tooltip;

pub use config::{Config, ConfigError, EditorOptions};
pub use player::{
    reduce, Command, Effect, Notice, PendingCall, Player, PlaybackState, PlayerHost, Status,
    TimerCallback, TimerFacility, TimerId, Transition, VirtualClock,
};
pub use script::{parse, parse_with_separator, Action, ActionOptions, ParsedDocument, ScriptError};
pub use surface::{EditingSurface, LineCol, MemorySurface, ParseLineColError, Point};
pub use tooltip::{
    Control, PageDot, Tooltip, TooltipError, TooltipInput, TooltipOptions, TooltipPhase,
    TooltipView,
};
