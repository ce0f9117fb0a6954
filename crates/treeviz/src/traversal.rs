//! The four traversal orders over an arena tree.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::{Link, VisualNode};

/// Traversal order selector. Wire names are the lowercase variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalKind {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl TraversalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalKind::InOrder => "inorder",
            TraversalKind::PreOrder => "preorder",
            TraversalKind::PostOrder => "postorder",
            TraversalKind::LevelOrder => "levelorder",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inorder" => Some(TraversalKind::InOrder),
            "preorder" => Some(TraversalKind::PreOrder),
            "postorder" => Some(TraversalKind::PostOrder),
            "levelorder" => Some(TraversalKind::LevelOrder),
            _ => None,
        }
    }
}

/// Collect node values below `root` in the requested order.
pub fn traverse<N: VisualNode>(arena: &[N], root: Option<u32>, kind: TraversalKind) -> Vec<i64> {
    let mut out = Vec::new();
    match kind {
        TraversalKind::InOrder => in_order(arena, root, &mut out),
        TraversalKind::PreOrder => pre_order(arena, root, &mut out),
        TraversalKind::PostOrder => post_order(arena, root, &mut out),
        TraversalKind::LevelOrder => level_order(arena, root, &mut out),
    }
    out
}

fn in_order<N: VisualNode>(arena: &[N], node: Option<u32>, out: &mut Vec<i64>) {
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    in_order(arena, n.l(), out);
    out.push(n.value());
    in_order(arena, n.r(), out);
}

fn pre_order<N: VisualNode>(arena: &[N], node: Option<u32>, out: &mut Vec<i64>) {
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    out.push(n.value());
    pre_order(arena, n.l(), out);
    pre_order(arena, n.r(), out);
}

fn post_order<N: VisualNode>(arena: &[N], node: Option<u32>, out: &mut Vec<i64>) {
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    post_order(arena, n.l(), out);
    post_order(arena, n.r(), out);
    out.push(n.value());
}

fn level_order<N: VisualNode>(arena: &[N], root: Option<u32>, out: &mut Vec<i64>) {
    let mut queue = VecDeque::new();
    if let Some(root) = root {
        queue.push_back(root);
    }
    while let Some(i) = queue.pop_front() {
        let n = &arena[i as usize];
        out.push(n.value());
        if let Some(l) = n.l() {
            queue.push_back(l);
        }
        if let Some(r) = n.r() {
            queue.push_back(r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlTree;

    fn sample() -> AvlTree {
        // Perfect shape, no rotations: 4 on top, (2, 6) below, leaves last.
        let mut tree = AvlTree::new();
        for v in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(v, false);
        }
        tree
    }

    #[test]
    fn all_four_orders() {
        let tree = sample();
        assert_eq!(tree.traverse(TraversalKind::InOrder), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.traverse(TraversalKind::PreOrder), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(tree.traverse(TraversalKind::PostOrder), vec![1, 3, 2, 5, 7, 6, 4]);
        assert_eq!(tree.traverse(TraversalKind::LevelOrder), vec![4, 2, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn empty_tree_traverses_to_nothing() {
        let tree = AvlTree::new();
        assert_eq!(tree.traverse(TraversalKind::InOrder), Vec::<i64>::new());
        assert_eq!(tree.traverse(TraversalKind::LevelOrder), Vec::<i64>::new());
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in [
            TraversalKind::InOrder,
            TraversalKind::PreOrder,
            TraversalKind::PostOrder,
            TraversalKind::LevelOrder,
        ] {
            assert_eq!(TraversalKind::from_name(kind.as_str()), Some(kind));
            let wire = serde_json::to_string(&kind).unwrap();
            assert_eq!(wire, format!("\"{}\"", kind.as_str()));
        }
        assert_eq!(TraversalKind::from_name("sideways"), None);
    }
}
