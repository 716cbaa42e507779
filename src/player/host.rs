//! Host notifications.

use super::state::Notice;

/// Receives lifecycle notifications from the player.
///
/// Both are called after the player has fully reset (idle, index 0, no
/// deferred calls, surface editable).
pub trait PlayerHost {
    fn on_stopped(&mut self) {}

    fn on_finished(&mut self) {}

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Stopped => self.on_stopped(),
            Notice::Finished => self.on_finished(),
        }
    }
}

/// Host that ignores notifications.
impl PlayerHost for () {}
