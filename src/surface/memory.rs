//! In-memory editing surface.

use super::{EditingSurface, LineCol, Point};

/// Default cell width in pixels.
const CHAR_WIDTH: f64 = 8.0;
/// Default line height in pixels.
const LINE_HEIGHT: f64 = 18.0;

/// An [`EditingSurface`] backed by plain strings.
///
/// Useful for headless hosts and tests. Coordinates use fixed cell metrics.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    content: String,
    canonical: String,
    read_only: bool,
    focused: bool,
    char_width: f64,
    line_height: f64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::with_metrics(CHAR_WIDTH, LINE_HEIGHT)
    }

    /// Create a surface with custom cell metrics.
    pub fn with_metrics(char_width: f64, line_height: f64) -> Self {
        Self {
            content: String::new(),
            canonical: String::new(),
            read_only: false,
            focused: false,
            char_width,
            line_height,
        }
    }

    /// Simulate a user edit. Rejected while read-only.
    pub fn edit(&mut self, content: impl Into<String>) -> bool {
        if self.read_only {
            return false;
        }
        self.content = content.into();
        true
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the content differs from the committed content.
    pub fn is_modified(&self) -> bool {
        self.content != self.canonical
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl EditingSurface for MemorySurface {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.canonical = content.to_string();
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn revert_to_canonical(&mut self) {
        self.content.clone_from(&self.canonical);
    }

    fn cursor_coords(&self, pos: LineCol) -> Point {
        Point {
            left: f64::from(pos.ch) * self.char_width,
            top: f64::from(pos.line) * self.line_height,
        }
    }
}
