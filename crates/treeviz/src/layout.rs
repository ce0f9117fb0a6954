//! Canvas layout: converts a tree into a flat, positioned render graph.
//!
//! Pure geometry over the arena. Each node bisects its horizontal interval,
//! shrunk by a damping factor so siblings keep breathing room, and rows
//! advance by a fixed height per depth level. Identical shape always yields
//! identical coordinates.

use serde::{Deserialize, Serialize};

use crate::types::{Color, Link, VisualNode};

/// Tunable geometry. The defaults match a 1000px canvas that widens
/// exponentially once the tree grows past four levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Vertical distance between depth levels.
    pub row_height: f64,
    /// Fraction of the available half-interval a child actually uses.
    pub damping: f64,
    /// Canvas width floor for shallow trees.
    pub min_canvas_width: f64,
    /// Horizontal width per leaf slot; scales the canvas as `2^(depth-1)`.
    pub depth_unit_width: f64,
    /// Vertical position of the root row.
    pub root_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 100.0,
            damping: 0.95,
            min_canvas_width: 1000.0,
            depth_unit_width: 120.0,
            root_y: 100.0,
        }
    }
}

/// One positioned node of the render graph. `left`, `right`, and `parent`
/// are indices into the returned list, which is in pre-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: u64,
    pub value: i64,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_factor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
}

/// Lay out the whole tree. Returns an empty list for an empty tree.
pub fn layout<N: VisualNode>(
    arena: &[N],
    root: Option<u32>,
    config: &LayoutConfig,
) -> Vec<RenderNode> {
    let mut out = Vec::new();
    let Some(root) = root else {
        return out;
    };
    let depth = depth_below(arena, Some(root));
    let canvas_width =
        (config.depth_unit_width * 2f64.powi(depth as i32 - 1)).max(config.min_canvas_width);
    place(arena, root, canvas_width / 2.0, config.root_y, 0.0, canvas_width, None, config, &mut out);
    out
}

fn depth_below<N: VisualNode>(arena: &[N], node: Option<u32>) -> u32 {
    match node {
        None => 0,
        Some(i) => {
            let n = &arena[i as usize];
            1 + depth_below(arena, n.l()).max(depth_below(arena, n.r()))
        }
    }
}

/// Position `node` at `(x, y)` inside `[left_bound, right_bound]`, then its
/// children in the split halves. Returns the node's index in `out`.
#[allow(clippy::too_many_arguments)]
fn place<N: VisualNode>(
    arena: &[N],
    node: u32,
    x: f64,
    y: f64,
    left_bound: f64,
    right_bound: f64,
    parent: Option<usize>,
    config: &LayoutConfig,
    out: &mut Vec<RenderNode>,
) -> usize {
    let n = &arena[node as usize];
    let deco = n.decorate(arena);
    let at = out.len();
    out.push(RenderNode {
        id: n.id(),
        value: n.value(),
        x,
        y,
        height: deco.height,
        balance_factor: deco.balance_factor,
        color: deco.color,
        left: None,
        right: None,
        parent,
    });

    let next_y = y + config.row_height;
    if let Some(l) = n.l() {
        let left_x = x - config.damping * (x - left_bound) / 2.0;
        let child = place(arena, l, left_x, next_y, left_bound, x, Some(at), config, out);
        out[at].left = Some(child);
    }
    if let Some(r) = n.r() {
        let right_x = x + config.damping * (right_bound - x) / 2.0;
        let child = place(arena, r, right_x, next_y, x, right_bound, Some(at), config, out);
        out[at].right = Some(child);
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlTree;
    use crate::red_black::RbTree;

    #[test]
    fn empty_tree_renders_nothing() {
        let tree = AvlTree::new();
        assert!(tree.render_snapshot().is_empty());
    }

    #[test]
    fn single_node_sits_mid_canvas() {
        let mut tree = AvlTree::new();
        tree.insert(42, false);
        let nodes = tree.render_snapshot();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].value, 42);
        assert_eq!(nodes[0].x, 500.0);
        assert_eq!(nodes[0].y, 100.0);
        assert_eq!(nodes[0].left, None);
        assert_eq!(nodes[0].right, None);
        assert_eq!(nodes[0].parent, None);
    }

    #[test]
    fn children_split_the_interval_with_damping() {
        let mut tree = AvlTree::new();
        for v in [10, 5, 15] {
            tree.insert(v, false);
        }
        let nodes = tree.render_snapshot();
        assert_eq!(nodes.len(), 3);

        // Pre-order: root, left, right.
        let root = &nodes[0];
        assert_eq!(root.value, 10);
        assert_eq!(root.left, Some(1));
        assert_eq!(root.right, Some(2));

        let left = &nodes[1];
        assert_eq!(left.value, 5);
        // x - 0.95 * (x - 0) / 2 with x = 500.
        assert_eq!(left.x, 500.0 - 0.95 * 500.0 / 2.0);
        assert_eq!(left.y, 200.0);
        assert_eq!(left.parent, Some(0));

        let right = &nodes[2];
        assert_eq!(right.value, 15);
        assert_eq!(right.x, 500.0 + 0.95 * 500.0 / 2.0);
        assert_eq!(right.parent, Some(0));
    }

    #[test]
    fn canvas_widens_past_four_levels() {
        let mut tree = AvlTree::new();
        for v in 1..=16 {
            tree.insert(v, false);
        }
        // 16 sequential inserts settle at depth 5: 120 * 2^4 = 1920.
        let nodes = tree.render_snapshot();
        assert_eq!(nodes[0].x, 960.0);
    }

    #[test]
    fn avl_nodes_carry_height_and_balance() {
        let mut tree = AvlTree::new();
        for v in [10, 5, 15] {
            tree.insert(v, false);
        }
        let root = &tree.render_snapshot()[0];
        assert_eq!(root.height, Some(2));
        assert_eq!(root.balance_factor, Some(0));
        assert_eq!(root.color, None);
    }

    #[test]
    fn red_black_nodes_carry_color_only() {
        let mut tree = RbTree::new();
        for v in [10, 5, 15] {
            tree.insert(v, false);
        }
        let root = &tree.render_snapshot()[0];
        assert_eq!(root.color, Some(Color::Black));
        assert_eq!(root.height, None);
        assert_eq!(root.balance_factor, None);
    }

    #[test]
    fn identical_shape_yields_identical_layout() {
        let build = || {
            let mut tree = AvlTree::new();
            for v in [8, 3, 13, 1, 5, 11, 17] {
                tree.insert(v, false);
            }
            tree.render_snapshot()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn config_controls_geometry() {
        let mut tree = AvlTree::new();
        tree.insert(1, false);
        let config = LayoutConfig { min_canvas_width: 400.0, root_y: 50.0, ..LayoutConfig::default() };
        let nodes = tree.render_snapshot_with(&config);
        assert_eq!(nodes[0].x, 200.0);
        assert_eq!(nodes[0].y, 50.0);
    }
}
