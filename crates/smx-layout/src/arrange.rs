// ABOUTME: Automatic layout construction for a given pane count.
// ABOUTME: Default policy table plus even splits, grids, and the main/sub arrangement.

use smx_core::PaneId;

use crate::tree::{LayoutNode, Orientation};

/// Share of the root given to the main row in [`LayoutKind::MainSub`].
pub const MAIN_SUB_RATIO: f32 = 0.7;

/// Named arrangement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Count-based default: 1 full, 2 side-by-side, 3 main-left,
    /// 4 and up a grid.
    Auto,
    /// All panes side by side.
    VSplit,
    /// All panes stacked.
    HSplit,
    /// Grid with `ceil(sqrt(n))` columns, panes assigned row-major.
    Grid,
    /// Two-tier layout: a main row over a sub row at a fixed 70/30 split.
    MainSub,
}

/// Builds default layout trees without caller-specified geometry.
pub struct AutoArranger;

impl AutoArranger {
    /// Arrange `panes` (in order) according to `kind`.
    ///
    /// Returns `None` for an empty pane list.
    pub fn arrange(kind: LayoutKind, panes: &[PaneId]) -> Option<LayoutNode> {
        if panes.is_empty() {
            return None;
        }
        Some(match kind {
            LayoutKind::Auto => Self::auto(panes),
            LayoutKind::VSplit => Self::even(panes, Orientation::Vertical),
            LayoutKind::HSplit => Self::even(panes, Orientation::Horizontal),
            LayoutKind::Grid => Self::grid(panes),
            LayoutKind::MainSub => {
                let main_len = panes.len().div_ceil(2);
                return Self::main_sub(&panes[..main_len], &panes[main_len..], MAIN_SUB_RATIO);
            }
        })
    }

    fn auto(panes: &[PaneId]) -> LayoutNode {
        match panes {
            [single] => LayoutNode::leaf(*single),
            [left, right] => {
                LayoutNode::vsplit_equal(LayoutNode::leaf(*left), LayoutNode::leaf(*right))
            }
            [main, top, bottom] => LayoutNode::vsplit_equal(
                LayoutNode::leaf(*main),
                LayoutNode::hsplit_equal(LayoutNode::leaf(*top), LayoutNode::leaf(*bottom)),
            ),
            _ => Self::grid(panes),
        }
    }

    /// Grid with `ceil(sqrt(n))` columns, row-major. A sparse last row is
    /// divided among the panes actually in it, so the root stays fully tiled.
    fn grid(panes: &[PaneId]) -> LayoutNode {
        let cols = (panes.len() as f64).sqrt().ceil() as usize;
        let rows: Vec<LayoutNode> = panes
            .chunks(cols)
            .map(|row| Self::even(row, Orientation::Vertical))
            .collect();
        Self::stack(&rows, Orientation::Horizontal)
    }

    /// Two-tier arrangement: `main` panes side by side over `sub` panes
    /// side by side, with `ratio` of the height going to the main row.
    pub fn main_sub(main: &[PaneId], sub: &[PaneId], ratio: f32) -> Option<LayoutNode> {
        match (main.is_empty(), sub.is_empty()) {
            (true, true) => None,
            (false, true) => Some(Self::even(main, Orientation::Vertical)),
            (true, false) => Some(Self::even(sub, Orientation::Vertical)),
            (false, false) => Some(LayoutNode::hsplit(
                ratio,
                Self::even(main, Orientation::Vertical),
                Self::even(sub, Orientation::Vertical),
            )),
        }
    }

    /// Evenly split panes along one axis by recursively halving the list.
    fn even(panes: &[PaneId], orientation: Orientation) -> LayoutNode {
        let leaves: Vec<LayoutNode> = panes.iter().map(|id| LayoutNode::leaf(*id)).collect();
        Self::stack(&leaves, orientation)
    }

    fn stack(nodes: &[LayoutNode], orientation: Orientation) -> LayoutNode {
        match nodes {
            [single] => single.clone(),
            _ => {
                let mid = nodes.len() / 2;
                let ratio = mid as f32 / nodes.len() as f32;
                let first = Self::stack(&nodes[..mid], orientation);
                let second = Self::stack(&nodes[mid..], orientation);
                match orientation {
                    Orientation::Horizontal => LayoutNode::hsplit(ratio, first, second),
                    Orientation::Vertical => LayoutNode::vsplit(ratio, first, second),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smx_core::Rect;

    fn ids(n: u64) -> Vec<PaneId> {
        (1..=n).map(PaneId).collect()
    }

    #[test]
    fn empty_pane_list_has_no_layout() {
        assert!(AutoArranger::arrange(LayoutKind::Auto, &[]).is_none());
    }

    #[test]
    fn auto_one_pane_fills_root() {
        let tree = AutoArranger::arrange(LayoutKind::Auto, &ids(1)).unwrap();
        assert_eq!(tree, LayoutNode::leaf(PaneId(1)));
    }

    #[test]
    fn auto_two_panes_side_by_side() {
        let tree = AutoArranger::arrange(LayoutKind::Auto, &ids(2)).unwrap();
        assert_eq!(
            tree,
            LayoutNode::vsplit_equal(LayoutNode::leaf(PaneId(1)), LayoutNode::leaf(PaneId(2)))
        );

        let areas = tree.compute(Rect::new(0, 0, 80, 24)).unwrap();
        assert_eq!(areas[&PaneId(1)], Rect::new(0, 0, 40, 24));
        assert_eq!(areas[&PaneId(2)], Rect::new(40, 0, 40, 24));
    }

    #[test]
    fn auto_three_panes_main_left_two_stacked_right() {
        let tree = AutoArranger::arrange(LayoutKind::Auto, &ids(3)).unwrap();
        assert_eq!(
            tree,
            LayoutNode::vsplit_equal(
                LayoutNode::leaf(PaneId(1)),
                LayoutNode::hsplit_equal(LayoutNode::leaf(PaneId(2)), LayoutNode::leaf(PaneId(3))),
            )
        );
    }

    #[test]
    fn auto_four_panes_two_by_two_grid() {
        let tree = AutoArranger::arrange(LayoutKind::Auto, &ids(4)).unwrap();
        assert_eq!(
            tree,
            LayoutNode::hsplit_equal(
                LayoutNode::vsplit_equal(LayoutNode::leaf(PaneId(1)), LayoutNode::leaf(PaneId(2))),
                LayoutNode::vsplit_equal(LayoutNode::leaf(PaneId(3)), LayoutNode::leaf(PaneId(4))),
            )
        );
    }

    #[test]
    fn grid_five_panes_is_row_major_with_sparse_last_row() {
        let root = Rect::new(0, 0, 90, 24);
        let tree = AutoArranger::arrange(LayoutKind::Auto, &ids(5)).unwrap();
        let areas = tree.compute(root).unwrap();
        assert_eq!(areas.len(), 5);

        // ceil(sqrt(5)) = 3 columns: panes 1-3 in the top row, 4-5 below.
        let top = areas[&PaneId(1)].y;
        assert_eq!(areas[&PaneId(2)].y, top);
        assert_eq!(areas[&PaneId(3)].y, top);
        assert!(areas[&PaneId(4)].y > top);
        assert_eq!(areas[&PaneId(5)].y, areas[&PaneId(4)].y);

        // Row-major: x increases with pane number within a row.
        assert!(areas[&PaneId(1)].x < areas[&PaneId(2)].x);
        assert!(areas[&PaneId(2)].x < areas[&PaneId(3)].x);
        assert!(areas[&PaneId(4)].x < areas[&PaneId(5)].x);

        // The sparse bottom row is divided among its two panes; the root
        // stays fully covered.
        let total: u32 = areas.values().map(Rect::area).sum();
        assert_eq!(total, root.area());
        assert_eq!(
            areas[&PaneId(4)].width + areas[&PaneId(5)].width,
            root.width
        );
    }

    #[test]
    fn vsplit_kind_keeps_panes_in_one_row() {
        let tree = AutoArranger::arrange(LayoutKind::VSplit, &ids(4)).unwrap();
        let areas = tree.compute(Rect::new(0, 0, 100, 20)).unwrap();
        for area in areas.values() {
            assert_eq!(area.y, 0);
            assert_eq!(area.height, 20);
            assert_eq!(area.width, 25);
        }
    }

    #[test]
    fn hsplit_kind_stacks_panes() {
        let tree = AutoArranger::arrange(LayoutKind::HSplit, &ids(3)).unwrap();
        let areas = tree.compute(Rect::new(0, 0, 60, 30)).unwrap();
        for area in areas.values() {
            assert_eq!(area.x, 0);
            assert_eq!(area.width, 60);
            assert_eq!(area.height, 10);
        }
    }

    #[test]
    fn main_sub_splits_seventy_thirty() {
        let root = Rect::new(0, 0, 100, 100);
        let tree = AutoArranger::main_sub(&[PaneId(1), PaneId(2)], &[PaneId(3)], MAIN_SUB_RATIO)
            .unwrap();
        let areas = tree.compute(root).unwrap();

        assert_eq!(areas[&PaneId(1)].height, 70);
        assert_eq!(areas[&PaneId(2)].height, 70);
        assert_eq!(areas[&PaneId(3)], Rect::new(0, 70, 100, 30));
    }

    #[test]
    fn main_sub_kind_puts_first_half_on_top() {
        let tree = AutoArranger::arrange(LayoutKind::MainSub, &ids(3)).unwrap();
        let areas = tree.compute(Rect::new(0, 0, 100, 40)).unwrap();

        // ceil(3/2) = 2 main panes on top, 1 sub pane below.
        assert_eq!(areas[&PaneId(1)].y, 0);
        assert_eq!(areas[&PaneId(2)].y, 0);
        assert_eq!(areas[&PaneId(3)].y, 28);
        assert_eq!(areas[&PaneId(3)].width, 100);
    }

    #[test]
    fn main_sub_with_empty_sub_row_is_a_plain_row() {
        let tree = AutoArranger::main_sub(&ids(2), &[], MAIN_SUB_RATIO).unwrap();
        let areas = tree.compute(Rect::new(0, 0, 80, 24)).unwrap();
        assert_eq!(areas[&PaneId(1)].height, 24);
        assert_eq!(areas[&PaneId(2)].height, 24);
    }

    #[test]
    fn large_grid_tiles_exactly() {
        let root = Rect::new(0, 0, 211, 61);
        for n in 1..=12 {
            let tree = AutoArranger::arrange(LayoutKind::Grid, &ids(n)).unwrap();
            let areas = tree.compute(root).unwrap();
            assert_eq!(areas.len(), n as usize);
            let total: u32 = areas.values().map(Rect::area).sum();
            assert_eq!(total, root.area(), "grid of {n} panes left gaps");
        }
    }
}
