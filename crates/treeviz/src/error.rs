//! Error types.
//!
//! Domain outcomes (value not found, duplicate insert, empty-tree delete) are
//! not errors; they travel as `success: false` / `found: false` inside the
//! report structs. The types here cover the two places a `Result` is the
//! right shape: structural validation and CLI input parsing.

use thiserror::Error;

/// A structural invariant the validators found broken.
///
/// Any of these means a programming defect in an engine, never a user-facing
/// condition; `assert_valid` exists for tests and debugging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root node has a parent link")]
    RootHasParent,
    #[error("broken parent link on a child of node {0}")]
    BrokenParentLink(i64),
    #[error("node {value}: stored height {stored}, computed {computed}")]
    HeightMismatch { value: i64, stored: u32, computed: u32 },
    #[error("node {value}: balance factor {balance} out of range")]
    BalanceOutOfRange { value: i64, balance: i32 },
    #[error("root is not black")]
    RootNotBlack,
    #[error("red node {0} has a red child")]
    RedRedEdge(i64),
    #[error("black-height mismatch under node {0}")]
    BlackHeightMismatch(i64),
    #[error("order violated: {prev} precedes {next}")]
    OrderViolation { prev: i64, next: i64 },
}

/// A CLI line the parser could not turn into a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} takes an integer value")]
    MissingValue(&'static str),
    #[error("not an integer: {0}")]
    InvalidValue(String),
    #[error("unknown traversal: {0} (expected inorder|preorder|postorder|levelorder)")]
    UnknownTraversal(String),
    #[error("unexpected trailing input after {0}")]
    UnexpectedArgument(&'static str),
}
