//! Operation reports and the engine facade.

use serde::{Deserialize, Serialize};

use treeviz_trace::Step;

use crate::avl::AvlTree;
use crate::error::InvariantError;
use crate::layout::{LayoutConfig, RenderNode};
use crate::red_black::RbTree;
use crate::traversal::TraversalKind;

/// Outcome of a mutating operation (insert or delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

impl OpReport {
    pub(crate) fn ok(path: Vec<i64>) -> Self {
        Self { success: true, path: Some(path), message: None, steps: None }
    }

    pub(crate) fn fail(message: impl Into<String>) -> Self {
        Self { success: false, path: None, message: Some(message.into()), steps: None }
    }

    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Outcome of a lookup. `path` lists the visited values root-first whether or
/// not the search succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindReport {
    pub found: bool,
    pub path: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

/// Engine selector. Wire tags are `"avl"` and `"redblack"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    Avl,
    RedBlack,
}

impl TreeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeKind::Avl => "avl",
            TreeKind::RedBlack => "redblack",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "avl" => Some(TreeKind::Avl),
            "redblack" => Some(TreeKind::RedBlack),
            _ => None,
        }
    }
}

/// One engine at a time behind a common contract.
#[derive(Debug)]
pub enum BalancedTree {
    Avl(AvlTree),
    RedBlack(RbTree),
}

impl Default for BalancedTree {
    fn default() -> Self {
        BalancedTree::new(TreeKind::Avl)
    }
}

impl BalancedTree {
    pub fn new(kind: TreeKind) -> Self {
        match kind {
            TreeKind::Avl => BalancedTree::Avl(AvlTree::new()),
            TreeKind::RedBlack => BalancedTree::RedBlack(RbTree::new()),
        }
    }

    pub fn kind(&self) -> TreeKind {
        match self {
            BalancedTree::Avl(_) => TreeKind::Avl,
            BalancedTree::RedBlack(_) => TreeKind::RedBlack,
        }
    }

    /// Replace the engine. The old tree is discarded wholesale, even when the
    /// kind is unchanged.
    pub fn switch(&mut self, kind: TreeKind) {
        *self = BalancedTree::new(kind);
    }

    pub fn insert(&mut self, value: i64, trace: bool) -> OpReport {
        match self {
            BalancedTree::Avl(t) => t.insert(value, trace),
            BalancedTree::RedBlack(t) => t.insert(value, trace),
        }
    }

    pub fn delete(&mut self, value: i64, trace: bool) -> OpReport {
        match self {
            BalancedTree::Avl(t) => t.delete(value, trace),
            BalancedTree::RedBlack(t) => t.delete(value, trace),
        }
    }

    pub fn find(&self, value: i64, trace: bool) -> FindReport {
        match self {
            BalancedTree::Avl(t) => t.find(value, trace),
            BalancedTree::RedBlack(t) => t.find(value, trace),
        }
    }

    pub fn traverse(&self, kind: TraversalKind) -> Vec<i64> {
        match self {
            BalancedTree::Avl(t) => t.traverse(kind),
            BalancedTree::RedBlack(t) => t.traverse(kind),
        }
    }

    pub fn render_snapshot(&self) -> Vec<RenderNode> {
        match self {
            BalancedTree::Avl(t) => t.render_snapshot(),
            BalancedTree::RedBlack(t) => t.render_snapshot(),
        }
    }

    pub fn render_snapshot_with(&self, config: &LayoutConfig) -> Vec<RenderNode> {
        match self {
            BalancedTree::Avl(t) => t.render_snapshot_with(config),
            BalancedTree::RedBlack(t) => t.render_snapshot_with(config),
        }
    }

    pub fn print(&self) -> String {
        match self {
            BalancedTree::Avl(t) => t.print(),
            BalancedTree::RedBlack(t) => t.print(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BalancedTree::Avl(t) => t.len(),
            BalancedTree::RedBlack(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> u32 {
        match self {
            BalancedTree::Avl(t) => t.height(),
            BalancedTree::RedBlack(t) => t.height(),
        }
    }

    pub fn clear(&mut self) {
        match self {
            BalancedTree::Avl(t) => t.clear(),
            BalancedTree::RedBlack(t) => t.clear(),
        }
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        match self {
            BalancedTree::Avl(t) => t.assert_valid(),
            BalancedTree::RedBlack(t) => t.assert_valid(),
        }
    }
}
