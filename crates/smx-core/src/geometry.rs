// ABOUTME: Cell-grid geometry primitives shared across the workspace.
// ABOUTME: Pane identifiers, row/column sizes, and rectangles in cell units.

use serde::{Deserialize, Serialize};

/// Unique identifier for a pane.
///
/// Stable for the lifetime of a pane and never reused after removal
/// within the same manager instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub u64);

impl std::fmt::Display for PaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pane dimensions in rows and columns (cell units, not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaneSize {
    pub rows: u16,
    pub cols: u16,
}

impl PaneSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

impl From<Rect> for PaneSize {
    fn from(rect: Rect) -> Self {
        Self {
            rows: rect.height,
            cols: rect.width,
        }
    }
}

/// A rectangle in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the cell at (x, y) falls inside this rectangle.
    ///
    /// The far edges saturate, so a rectangle positioned near `u16::MAX`
    /// never panics on overflow in debug builds.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_size_from_rect() {
        let size = PaneSize::from(Rect::new(10, 5, 40, 24));
        assert_eq!(size, PaneSize::new(24, 40));
    }

    #[test]
    fn rect_contains_is_exclusive_of_far_edges() {
        let rect = Rect::new(10, 5, 40, 24);
        assert!(rect.contains(10, 5));
        assert!(rect.contains(49, 28));
        assert!(!rect.contains(50, 5));
        assert!(!rect.contains(10, 29));
        assert!(!rect.contains(9, 5));
    }

    #[test]
    fn contains_saturates_near_coordinate_limit() {
        let rect = Rect::new(u16::MAX - 10, u16::MAX - 10, 20, 20);
        assert!(rect.contains(u16::MAX - 10, u16::MAX - 10));
        assert!(rect.contains(u16::MAX - 1, u16::MAX - 1));
        assert!(!rect.contains(u16::MAX - 11, u16::MAX - 1));
    }
}
