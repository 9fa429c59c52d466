// ABOUTME: Binary tree of rectangular splits whose leaves are panes.
// ABOUTME: Trees are immutable values; structural edits build new trees.

use std::collections::{HashMap, HashSet};

use smx_core::{PaneId, Rect};

/// Axis of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Split into top and bottom (the dividing line runs horizontally).
    Horizontal,
    /// Split into left and right (side by side).
    Vertical,
}

/// Errors from layout validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The root rectangle cannot fit every pane at one cell or more.
    #[error("root rectangle {width}x{height} is too small for this layout")]
    RootTooSmall { width: u16, height: u16 },

    /// The tree references a pane the registry does not know.
    #[error("layout references unknown pane {0}")]
    UnknownPane(PaneId),

    /// The tree references the same pane in more than one leaf.
    #[error("layout references pane {0} in more than one leaf")]
    DuplicatePane(PaneId),
}

/// A layout tree: a leaf is a single pane, an internal node splits its
/// rectangle between two children at a fixed ratio.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Leaf(PaneId),
    Split {
        orientation: Orientation,
        /// Share of the first child, in (0, 1).
        ratio: f32,
        first: Box<LayoutNode>,
        second: Box<LayoutNode>,
    },
}

impl LayoutNode {
    /// Single pane filling its rectangle.
    pub fn leaf(pane_id: PaneId) -> Self {
        Self::Leaf(pane_id)
    }

    /// Split into top (`first`) and bottom (`second`).
    pub fn hsplit(ratio: f32, first: LayoutNode, second: LayoutNode) -> Self {
        Self::Split {
            orientation: Orientation::Horizontal,
            ratio: ratio.clamp(0.1, 0.9),
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Split into left (`first`) and right (`second`).
    pub fn vsplit(ratio: f32, first: LayoutNode, second: LayoutNode) -> Self {
        Self::Split {
            orientation: Orientation::Vertical,
            ratio: ratio.clamp(0.1, 0.9),
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Equal top/bottom split.
    pub fn hsplit_equal(first: LayoutNode, second: LayoutNode) -> Self {
        Self::hsplit(0.5, first, second)
    }

    /// Equal side-by-side split.
    pub fn vsplit_equal(first: LayoutNode, second: LayoutNode) -> Self {
        Self::vsplit(0.5, first, second)
    }

    /// Compute a concrete rectangle for every leaf, tiling `root` exactly.
    ///
    /// The first child of a split gets `floor(dimension * ratio)` cells and
    /// the second child gets the remainder, so identical inputs always
    /// produce identical rectangles with no gaps or overlaps.
    ///
    /// Fails with [`LayoutError::RootTooSmall`] if any leaf would end up
    /// narrower or shorter than one cell, and with
    /// [`LayoutError::DuplicatePane`] if a pane appears in more than one
    /// leaf (the second rectangle would silently shadow the first,
    /// leaving part of the root covered by nothing).
    pub fn compute(&self, root: Rect) -> Result<HashMap<PaneId, Rect>, LayoutError> {
        let mut seen = HashSet::new();
        for id in self.pane_ids() {
            if !seen.insert(id) {
                return Err(LayoutError::DuplicatePane(id));
            }
        }

        let mut areas = HashMap::new();
        if self.compute_into(root, &mut areas) {
            Ok(areas)
        } else {
            Err(LayoutError::RootTooSmall {
                width: root.width,
                height: root.height,
            })
        }
    }

    /// Returns false if any leaf rectangle degenerates below one cell.
    fn compute_into(&self, area: Rect, areas: &mut HashMap<PaneId, Rect>) -> bool {
        match self {
            Self::Leaf(id) => {
                if area.width < 1 || area.height < 1 {
                    return false;
                }
                areas.insert(*id, area);
                true
            }
            Self::Split {
                orientation,
                ratio,
                first,
                second,
            } => {
                let (first_area, second_area) = split_rect(area, *orientation, *ratio);
                first.compute_into(first_area, areas) && second.compute_into(second_area, areas)
            }
        }
    }

    /// All pane IDs in this tree, depth-first.
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.collect_pane_ids(&mut ids);
        ids
    }

    fn collect_pane_ids(&self, ids: &mut Vec<PaneId>) {
        match self {
            Self::Leaf(id) => ids.push(*id),
            Self::Split { first, second, .. } => {
                first.collect_pane_ids(ids);
                second.collect_pane_ids(ids);
            }
        }
    }

    /// Whether a pane appears in this tree.
    pub fn contains(&self, pane_id: PaneId) -> bool {
        match self {
            Self::Leaf(id) => *id == pane_id,
            Self::Split { first, second, .. } => {
                first.contains(pane_id) || second.contains(pane_id)
            }
        }
    }

    /// Number of leaves. Always at least one.
    pub fn pane_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Split { first, second, .. } => first.pane_count() + second.pane_count(),
        }
    }

    /// Remove a pane, collapsing its parent split into the sibling.
    ///
    /// Returns the new tree, or `None` when the removed leaf was the last
    /// one. The original tree is left untouched.
    pub fn remove(&self, pane_id: PaneId) -> Option<LayoutNode> {
        match self {
            Self::Leaf(id) if *id == pane_id => None,
            Self::Leaf(_) => Some(self.clone()),
            Self::Split {
                orientation,
                ratio,
                first,
                second,
            } => match (first.remove(pane_id), second.remove(pane_id)) {
                (Some(first), Some(second)) => Some(Self::Split {
                    orientation: *orientation,
                    ratio: *ratio,
                    first: Box::new(first),
                    second: Box::new(second),
                }),
                (None, Some(sibling)) | (Some(sibling), None) => Some(sibling),
                (None, None) => None,
            },
        }
    }
}

fn split_rect(area: Rect, orientation: Orientation, ratio: f32) -> (Rect, Rect) {
    // Saturating offsets: a root positioned near u16::MAX must not panic
    // in debug builds.
    match orientation {
        Orientation::Horizontal => {
            let first_height = (f32::from(area.height) * ratio).floor() as u16;
            let first = Rect {
                height: first_height,
                ..area
            };
            let second = Rect {
                y: area.y.saturating_add(first_height),
                height: area.height.saturating_sub(first_height),
                ..area
            };
            (first, second)
        }
        Orientation::Vertical => {
            let first_width = (f32::from(area.width) * ratio).floor() as u16;
            let first = Rect {
                width: first_width,
                ..area
            };
            let second = Rect {
                x: area.x.saturating_add(first_width),
                width: area.width.saturating_sub(first_width),
                ..area
            };
            (first, second)
        }
    }
}
