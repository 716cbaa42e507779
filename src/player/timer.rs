//! Timer facility used for delayed calls.
//!
//! The player keeps the callbacks; the facility only learns an id and a
//! delay, and the host calls [`Player::fire_timer`] once the delay elapsed.
//! Timers handed to the facility are never retracted, so a callback may
//! still fire after playback stopped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use super::controller::Player;

/// A deferred call. Receives the player so it can advance, stop or request
/// further timers.
pub type TimerCallback = Box<dyn FnOnce(&mut Player)>;

/// Identifier of a timer handed to a [`TimerFacility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Host timer facility.
pub trait TimerFacility {
    /// Arrange for `Player::fire_timer(id)` to be called after `delay`.
    fn schedule(&mut self, id: TimerId, delay: Duration);

    /// Whether scheduled timers ever fire. When false the player discards
    /// delayed callbacks instead of holding them for `fire_timer`.
    fn keeps_timers(&self) -> bool {
        true
    }
}

/// Facility that drops every timer. Delayed calls never fire and their
/// callbacks are discarded on request.
impl TimerFacility for () {
    fn schedule(&mut self, _id: TimerId, _delay: Duration) {}

    fn keeps_timers(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
struct ClockInner {
    now: Duration,
    seq: u64,
    /// Keyed by (due time, scheduling order)
    queue: BTreeMap<(Duration, u64), TimerId>,
}

/// Deterministic, manually advanced timer facility.
///
/// Clones share the same clock, so a host keeps one handle and gives the
/// player another.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers not yet fired.
    pub fn scheduled(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Due time of the next timer, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .queue
            .keys()
            .next()
            .map(|(due, _)| *due)
    }

    /// Advance by `by`, firing due timers on `player` in due order.
    ///
    /// Timers scheduled by fired callbacks are fired too if they fall due
    /// within the window. Returns the number of timers fired.
    pub fn run_for(&self, player: &mut Player, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        while let Some(id) = self.pop_due(target) {
            player.fire_timer(id);
            fired += 1;
        }

        self.inner.borrow_mut().now = target;
        fired
    }

    fn pop_due(&self, until: Duration) -> Option<TimerId> {
        let mut inner = self.inner.borrow_mut();
        let (&key, _) = inner.queue.iter().next()?;
        if key.0 > until {
            return None;
        }
        inner.now = key.0;
        inner.queue.remove(&key)
    }
}

impl TimerFacility for VirtualClock {
    fn schedule(&mut self, id: TimerId, delay: Duration) {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now + delay;
        let seq = inner.seq;
        inner.seq += 1;
        inner.queue.insert((due, seq), id);
        trace!(id = id.0, ?due, "Timer scheduled");
    }
}
