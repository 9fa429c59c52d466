// ABOUTME: Pane layout management for splitmux.
// ABOUTME: Binary split trees, cell-exact tiling, and automatic arrangements.

mod arrange;
mod tree;

pub use arrange::{AutoArranger, LayoutKind, MAIN_SUB_RATIO};
pub use tree::{LayoutError, LayoutNode, Orientation};
