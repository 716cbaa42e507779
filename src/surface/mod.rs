//! Editing surface capability.
//!
//! The player never touches an editor widget directly. It drives whatever
//! implements [`EditingSurface`]: content, read-only flag, focus and the
//! canonical (last committed) content.

mod memory;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

pub use memory::MemorySurface;

/// A zero-based `line:ch` position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineCol {
    pub line: u32,
    pub ch: u32,
}

impl LineCol {
    pub fn new(line: u32, ch: u32) -> Self {
        Self { line, ch }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}

/// Error returned when a `line:ch` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid position '{input}', expected 'line:ch'")]
pub struct ParseLineColError {
    pub input: String,
}

impl FromStr for LineCol {
    type Err = ParseLineColError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLineColError {
            input: s.to_string(),
        };

        let (line, ch) = s.split_once(':').ok_or_else(err)?;
        let line = line.trim().parse().map_err(|_| err())?;
        let ch = ch.trim().parse().map_err(|_| err())?;

        Ok(Self { line, ch })
    }
}

/// Screen coordinates of a text position, as reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// The editor widget the player drives.
///
/// Implementations wrap a concrete text-editing widget. The player is the
/// only component that mutates it; presentation code only reads
/// coordinates.
pub trait EditingSurface {
    /// Current (possibly edited) content.
    fn content(&self) -> String;

    /// Replace the content and commit it as the canonical content.
    fn set_content(&mut self, content: &str);

    /// Toggle whether the user may edit.
    fn set_read_only(&mut self, read_only: bool);

    /// Give the surface input focus.
    fn focus(&mut self);

    /// Discard edits and restore the last committed content.
    fn revert_to_canonical(&mut self);

    /// Screen coordinates of `pos`. Only used for positioning tooltips.
    fn cursor_coords(&self, pos: LineCol) -> Point;
}

/// Shared handle, so a host can keep inspecting a surface it handed over.
impl<S: EditingSurface> EditingSurface for Rc<RefCell<S>> {
    fn content(&self) -> String {
        self.borrow().content()
    }

    fn set_content(&mut self, content: &str) {
        self.borrow_mut().set_content(content)
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.borrow_mut().set_read_only(read_only)
    }

    fn focus(&mut self) {
        self.borrow_mut().focus()
    }

    fn revert_to_canonical(&mut self) {
        self.borrow_mut().revert_to_canonical()
    }

    fn cursor_coords(&self, pos: LineCol) -> Point {
        self.borrow().cursor_coords(pos)
    }
}
