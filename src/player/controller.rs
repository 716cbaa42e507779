//! The playback controller.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::host::PlayerHost;
use super::state::{reduce, Command, Effect, Notice, PendingCall, PlaybackState, Status};
use super::timer::{TimerCallback, TimerFacility, TimerId};
use crate::config::{Config, ConfigError, EditorOptions};
use crate::script::{parse_with_separator, Action, ParsedDocument, ScriptError};
use crate::surface::{EditingSurface, LineCol, Point};

/// Plays a walkthrough over an editing surface.
///
/// Single-threaded: every operation runs to completion before returning.
/// Callbacks passed to [`Player::request_timer`] receive `&mut Player` and
/// may re-enter any operation.
pub struct Player {
    config: Config,
    document: ParsedDocument,
    state: PlaybackState,
    surface: Box<dyn EditingSurface>,
    host: Box<dyn PlayerHost>,
    timers: Box<dyn TimerFacility>,
    in_flight: BTreeMap<TimerId, TimerCallback>,
    next_timer_id: u64,
    /// Last value passed to `set_playing`
    playing_flag: bool,
}

impl Player {
    /// Create an idle player with an empty document.
    ///
    /// # Arguments
    /// * `config` - Validated before anything else is set up
    /// * `surface` - Editor widget the player drives
    /// * `host` - Receives stopped/finished notifications
    /// * `timers` - Fires delayed calls through [`Player::fire_timer`]
    pub fn new(
        config: Config,
        surface: Box<dyn EditingSurface>,
        host: Box<dyn PlayerHost>,
        timers: Box<dyn TimerFacility>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            document: ParsedDocument::default(),
            state: PlaybackState::new(),
            surface,
            host,
            timers,
            in_flight: BTreeMap::new(),
            next_timer_id: 0,
            playing_flag: false,
        })
    }

    // === Input ===

    /// Parse annotated text and load it.
    ///
    /// On a parse error the current document is kept.
    pub fn load_annotated(&mut self, text: &str) -> Result<(), ScriptError> {
        let document = parse_with_separator(text, &self.config.separator)?;
        self.load_document(document);
        Ok(())
    }

    /// Load a pre-built document and push its source into the surface.
    ///
    /// Playback state is left alone.
    pub fn load_document(&mut self, document: ParsedDocument) {
        debug!(
            actions = document.actions.len(),
            source_len = document.source.len(),
            "Loading document"
        );
        self.surface.set_content(&document.source);
        self.document = document;
    }

    // === Lifecycle ===

    /// Start or resume playback.
    pub fn play(&mut self) {
        self.apply(Command::Play);
    }

    /// Pause playback. No-op unless playing.
    pub fn pause(&mut self) {
        self.apply(Command::Pause);
    }

    /// Reset to idle and notify the host it stopped.
    pub fn stop(&mut self) {
        self.apply(Command::Stop);
    }

    /// Reset to idle and notify the host it finished.
    pub fn finish(&mut self) {
        self.apply(Command::Finish);
    }

    /// Pause when playing, play otherwise.
    pub fn toggle(&mut self) {
        if self.state.status == Status::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Follow a host-owned `playing` flag. Only changes of the flag act.
    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.playing_flag {
            return;
        }
        self.playing_flag = playing;

        if playing {
            self.play();
        } else {
            self.pause();
        }
    }

    fn apply(&mut self, command: Command) {
        let from = self.state.status;
        let transition = reduce(from, command, !self.document.actions.is_empty());

        match transition.effect {
            Some(Effect::Enter) => {
                if !self.state.pending.is_empty() {
                    let dropped = self.state.pending.len();
                    debug!(dropped, "Dropping calls deferred while idle");
                    self.state.pending.clear();
                }
                self.surface.revert_to_canonical();
                self.surface.set_read_only(true);
                self.surface.focus();
            }
            Some(Effect::Resume) => self.surface.focus(),
            Some(Effect::Release(_)) => {
                self.surface.set_read_only(false);
                self.state.reset();
            }
            None => {}
        }

        self.state.status = transition.status;
        if from != transition.status || transition.effect.is_some() {
            debug!(?command, ?from, to = ?transition.status, "Playback transition");
        }

        match transition.effect {
            Some(Effect::Resume) => self.drain_pending(),
            Some(Effect::Release(notice)) => self.notify(notice),
            _ => {}
        }
    }

    fn notify(&mut self, notice: Notice) {
        debug!(?notice, "Notifying host");
        self.host.notify(notice);
    }

    /// Replay deferred calls in order while still playing.
    ///
    /// A replayed call may pause, stop or enqueue more calls, so the status
    /// is checked again before every dequeue.
    fn drain_pending(&mut self) {
        while self.state.status == Status::Playing {
            let Some(call) = self.state.pending.pop_front() else {
                break;
            };
            trace!(delay = ?call.delay, remaining = self.state.pending.len(), "Replaying deferred call");
            self.run_or_schedule(call.callback, call.delay);
        }
    }

    // === Timers ===

    /// Run `callback` now, after `delay`, or on the next resume.
    ///
    /// While not playing the call is queued and replayed, delay intact, on
    /// the next resume from `Paused`. Calls queued while idle belong to no
    /// session and are dropped when a new one starts. While playing a zero
    /// delay runs the callback inline; otherwise it goes to the timer
    /// facility.
    pub fn request_timer<F>(&mut self, callback: F, delay: Duration)
    where
        F: FnOnce(&mut Player) + 'static,
    {
        let callback: TimerCallback = Box::new(callback);

        if self.state.status != Status::Playing {
            trace!(?delay, status = ?self.state.status, "Deferring timer request");
            self.state.pending.push_back(PendingCall { callback, delay });
            return;
        }

        self.run_or_schedule(callback, delay);
    }

    fn run_or_schedule(&mut self, callback: TimerCallback, delay: Duration) {
        if delay.is_zero() {
            callback(self);
            return;
        }

        if !self.timers.keeps_timers() {
            trace!(?delay, "Timer facility drops delayed calls");
            return;
        }

        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.in_flight.insert(id, callback);
        self.timers.schedule(id, delay);
    }

    /// Run the callback of an elapsed timer.
    ///
    /// Runs regardless of status; callbacks that care must check it.
    /// Returns false for unknown or already fired ids.
    pub fn fire_timer(&mut self, id: TimerId) -> bool {
        match self.in_flight.remove(&id) {
            Some(callback) => {
                if self.state.status != Status::Playing {
                    trace!(id = id.0, status = ?self.state.status, "Timer fired outside playback");
                }
                callback(self);
                true
            }
            None => {
                warn!(id = id.0, "Unknown timer fired");
                false
            }
        }
    }

    // === Navigation ===

    /// Move the action cursor. Not bounds-checked.
    pub fn set_action_index(&mut self, index: isize) {
        trace!(from = self.state.action_index, to = index, "Action index changed");
        self.state.action_index = index;
    }

    pub fn advance(&mut self) {
        self.set_action_index(self.state.action_index.saturating_add(1));
    }

    pub fn retreat(&mut self) {
        self.set_action_index(self.state.action_index.saturating_sub(1));
    }

    // === Accessors ===

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn action_index(&self) -> isize {
        self.state.action_index
    }

    pub fn total_actions(&self) -> usize {
        self.document.actions.len()
    }

    /// Action under the cursor, `None` at sentinel positions.
    pub fn current_action(&self) -> Option<&Action> {
        usize::try_from(self.state.action_index)
            .ok()
            .and_then(|index| self.document.actions.get(index))
    }

    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Options the host should create its editor widget with.
    pub fn editor_options(&self) -> &EditorOptions {
        &self.config.editor
    }

    /// Number of calls waiting for the next resume.
    pub fn pending_calls(&self) -> usize {
        self.state.pending.len()
    }

    /// Number of timers handed to the facility and not yet fired.
    pub fn in_flight_timers(&self) -> usize {
        self.in_flight.len()
    }

    /// Read-only view of the surface.
    pub fn surface(&self) -> &dyn EditingSurface {
        self.surface.as_ref()
    }

    /// Screen coordinates of a source position.
    pub fn cursor_coords(&self, pos: LineCol) -> Point {
        self.surface.cursor_coords(pos)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("status", &self.state.status)
            .field("action_index", &self.state.action_index)
            .field("actions", &self.document.actions.len())
            .field("pending", &self.state.pending.len())
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}
