//! Balanced-tree visualizer core: AVL and red-black search trees that narrate
//! their own work.
//!
//! Every mutating or searching operation can emit a deterministic, replayable
//! step trace (see the `treeviz-trace` crate) describing comparisons,
//! rotations, recolorings, and structure updates in presentation-ready form.
//! Alongside the engines sit the four classic traversals, a pure-geometry
//! canvas layout that turns a tree into positioned render nodes, a structural
//! ASCII printer, and a line-oriented command layer for the `treeviz` binary.
//!
//! Nodes live in `Vec`-backed arenas; every link (`parent`, `left`, `right`)
//! is an `Option<u32>` arena index, so no link participates in ownership or
//! destruction order. Node ids are monotonically increasing and never reused.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Link`] / [`VisualNode`] traits, [`Color`], decorations |
//! [`avl`] | [`AvlTree`]: height-balanced engine |
//! [`red_black`] | [`RbTree`]: recolor-and-rotate engine |
//! [`traversal`] | inorder / preorder / postorder / levelorder |
//! [`layout`] | canvas geometry, [`RenderNode`] snapshots |
//! [`print`] | structural ASCII printer |
//! [`tree`] | [`BalancedTree`] facade, operation reports |
//! [`cli`] | command parsing and execution for the binary |
//! [`error`] | invariant and command error taxonomies |

pub mod avl;
pub mod cli;
pub mod error;
pub mod layout;
pub mod print;
pub mod red_black;
pub mod traversal;
pub mod tree;
pub mod types;

mod search;

pub use avl::{AvlNode, AvlTree};
pub use cli::{parse_command, run_command, Command};
pub use error::{CommandError, InvariantError};
pub use layout::{layout, LayoutConfig, RenderNode};
pub use print::print_tree;
pub use red_black::{RbNode, RbTree};
pub use traversal::{traverse, TraversalKind};
pub use tree::{BalancedTree, FindReport, OpReport, TreeKind};
pub use types::{Color, Decoration, Link, NodeId, VisualNode};

pub use treeviz_trace::{
    NoopSink, RotationKind, Step, StepKind, StepRecorder, StepSink, TraceReplay,
};
