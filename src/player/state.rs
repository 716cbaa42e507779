//! Playback state and the transition reducer.
//!
//! [`reduce`] is a pure function over [`Status`]; the player applies the
//! returned [`Effect`] to the editing surface, the deferred-call queue and
//! the host.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use super::timer::TimerCallback;

/// Playback status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Not playing. Initial state and the target of stop/finish.
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Commands accepted by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    Finish,
}

/// Lifecycle notification sent to the host after a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Stopped,
    Finished,
}

/// Side effect attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Idle to Playing: revert the surface, make it read-only, focus it.
    Enter,
    /// Paused to Playing: focus the surface, then drain deferred calls.
    Resume,
    /// Make the surface editable, reset the state, then notify the host.
    Release(Notice),
}

/// Outcome of [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub status: Status,
    pub effect: Option<Effect>,
}

impl Transition {
    fn stay(status: Status) -> Self {
        Self {
            status,
            effect: None,
        }
    }

    fn to(status: Status, effect: Effect) -> Self {
        Self {
            status,
            effect: Some(effect),
        }
    }
}

/// Compute the next status for `command`.
///
/// Misuse (pausing while not playing, playing while playing) is a no-op.
/// Playing an empty action list finishes immediately without ever entering
/// `Playing`.
pub fn reduce(status: Status, command: Command, has_actions: bool) -> Transition {
    match (status, command) {
        (Status::Playing, Command::Play) => Transition::stay(Status::Playing),
        (Status::Paused, Command::Play) => Transition::to(Status::Playing, Effect::Resume),
        (Status::Idle, Command::Play) if has_actions => {
            Transition::to(Status::Playing, Effect::Enter)
        }
        (Status::Idle, Command::Play) => {
            Transition::to(Status::Idle, Effect::Release(Notice::Finished))
        }
        (Status::Playing, Command::Pause) => Transition::stay(Status::Paused),
        (other, Command::Pause) => Transition::stay(other),
        (_, Command::Stop) => Transition::to(Status::Idle, Effect::Release(Notice::Stopped)),
        (_, Command::Finish) => Transition::to(Status::Idle, Effect::Release(Notice::Finished)),
    }
}

/// A call deferred while playback was not running.
pub struct PendingCall {
    pub callback: TimerCallback,
    pub delay: Duration,
}

impl fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCall")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Mutable playback state owned by the player.
#[derive(Debug, Default)]
pub struct PlaybackState {
    pub status: Status,
    /// Cursor into the action list. Not bounds-checked: `-1` and `len` are
    /// valid "before first" / "after last" positions for presentation code.
    pub action_index: isize,
    /// Calls deferred until the next transition into `Playing`, FIFO
    pub pending: VecDeque<PendingCall>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to idle: index 0, no deferred calls.
    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.action_index = 0;
        self.pending.clear();
    }
}
