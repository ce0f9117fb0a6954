//! Node identity, color, and the shared node traits.
//!
//! Nodes live in a `Vec`-backed arena; every link (`p`, `l`, `r`) is an
//! `Option<u32>` index into that arena. Slot indices are an internal detail
//! and are never exposed; the stable, monotonically increasing [`NodeId`] is
//! what render snapshots carry.

use serde::{Deserialize, Serialize};

/// Stable node identity, assigned at creation and never reused.
///
/// Distinct from the arena slot index: slots of deleted nodes linger as
/// detached tombstones, ids do not come back.
pub type NodeId = u64;

/// Red-Black node color. Absent children count as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

/// Tree links (`p`, `l`, `r`) as arena indices. Read-only: the engines
/// mutate their own concrete nodes, the generic passes only walk.
pub trait Link {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
}

/// Per-node metadata copied into render snapshots and debug printouts.
///
/// AVL nodes fill `height` and `balance_factor`; Red-Black nodes fill
/// `color`. Nothing fills all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoration {
    pub height: Option<u32>,
    pub balance_factor: Option<i32>,
    pub color: Option<Color>,
}

/// What traversal, search, layout, and printing need from a node, written
/// once and implemented by both engines' node types.
pub trait VisualNode: Link + Sized {
    fn id(&self) -> NodeId;
    fn value(&self) -> i64;
    /// Metadata projection. Takes the arena because derived fields (the AVL
    /// balance factor) read the children.
    fn decorate(&self, arena: &[Self]) -> Decoration;
}
