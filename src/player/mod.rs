//! Walkthrough playback.
//!
//! # Architecture
//!
//! - `state`: status, the pure transition reducer and the mutable playback state
//! - `controller`: [`Player`], which applies transitions to the editing
//!   surface, replays deferred calls and notifies the host
//! - `timer`: the timer facility contract and a deterministic [`VirtualClock`]
//! - `host`: lifecycle notifications
//!
//! ```text
//!            play             pause
//!   Idle ──────────▶ Playing ───────▶ Paused
//!    ▲                  ▲                │
//!    │ stop / finish    └──── play ──────┘
//!    └──────────── (from any state)
//! ```

mod controller;
mod host;
mod state;
mod timer;

pub use controller::Player;
pub use host::PlayerHost;
pub use state::{reduce, Command, Effect, Notice, PendingCall, PlaybackState, Status, Transition};
pub use timer::{TimerCallback, TimerFacility, TimerId, VirtualClock};
