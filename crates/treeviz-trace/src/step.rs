//! Trace record types.
//!
//! One [`Step`] describes one algorithm micro-event. Steps are immutable once
//! recorded and are serialized with the camelCase field names the playback
//! layer consumes.

use serde::{Deserialize, Serialize};

/// Classification of a single algorithm micro-event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// A key comparison between the probed value and a node's value.
    Comparison,
    /// A node (or path) brought to the consumer's attention.
    Highlight,
    /// A structural rotation, or the detection of a rotation case.
    Rotation,
    /// A completed structural or metadata update.
    Update,
}

/// Rotation case tag.
///
/// Case-detection steps carry the case being repaired; primitive rotation
/// steps carry the tag of the single-rotation case they repair, so a right
/// rotation is tagged `LL` and a left rotation `RR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationKind {
    LL,
    RR,
    LR,
    RL,
}

// Suggested display durations, in milliseconds. These are hints for a
// playback layer, not anything the engines wait on.
pub const COMPARISON_MS: u32 = 800;
pub const HIGHLIGHT_MS: u32 = 800;
pub const ROTATION_MS: u32 = 1000;
pub const UPDATE_MS: u32 = 500;

/// Immutable record of one algorithm micro-event.
///
/// Produced in strict execution order; the trace for one engine call is a
/// flat, append-only sequence of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: StepKind,
    /// The node value this step centers on.
    pub value: i64,
    /// The probed value, for comparison steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<i64>,
    /// Human-readable description of the event.
    pub message: String,
    /// Values of the nodes visited so far, where the event is path-shaped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<i64>>,
    /// Values of the nodes structurally involved in the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_nodes: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_kind: Option<RotationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_duration_ms: Option<u32>,
}

impl Step {
    fn new(kind: StepKind, value: i64, message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            kind,
            value,
            target_value: None,
            message: message.into(),
            path: None,
            affected_nodes: None,
            rotation_kind: None,
            suggested_duration_ms: Some(duration_ms),
        }
    }

    /// A comparison of `target` against the node holding `value`.
    pub fn comparison(value: i64, target: i64, message: impl Into<String>) -> Self {
        let mut step = Self::new(StepKind::Comparison, value, message, COMPARISON_MS);
        step.target_value = Some(target);
        step
    }

    /// A comparison that examines a node's shape rather than probing a value.
    pub fn check(value: i64, message: impl Into<String>) -> Self {
        Self::new(StepKind::Comparison, value, message, COMPARISON_MS)
    }

    pub fn highlight(value: i64, message: impl Into<String>) -> Self {
        Self::new(StepKind::Highlight, value, message, HIGHLIGHT_MS)
    }

    /// A primitive rotation pivoting at the node holding `value`.
    pub fn rotation(
        value: i64,
        message: impl Into<String>,
        affected: Vec<i64>,
        kind: RotationKind,
    ) -> Self {
        let mut step = Self::new(StepKind::Rotation, value, message, ROTATION_MS);
        step.affected_nodes = Some(affected);
        step.rotation_kind = Some(kind);
        step
    }

    pub fn update(value: i64, message: impl Into<String>) -> Self {
        Self::new(StepKind::Update, value, message, UPDATE_MS)
    }

    pub fn with_path(mut self, path: Vec<i64>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_affected(mut self, nodes: Vec<i64>) -> Self {
        self.affected_nodes = Some(nodes);
        self
    }

    pub fn with_duration_ms(mut self, ms: u32) -> Self {
        self.suggested_duration_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_defaults() {
        let step = Step::comparison(10, 7, "Comparing 7 with 10");
        assert_eq!(step.kind, StepKind::Comparison);
        assert_eq!(step.value, 10);
        assert_eq!(step.target_value, Some(7));
        assert_eq!(step.suggested_duration_ms, Some(COMPARISON_MS));
        assert_eq!(step.rotation_kind, None);
    }

    #[test]
    fn rotation_carries_affected_and_kind() {
        let step = Step::rotation(10, "Left rotation at node 10", vec![10, 20], RotationKind::RR);
        assert_eq!(step.kind, StepKind::Rotation);
        assert_eq!(step.affected_nodes.as_deref(), Some(&[10, 20][..]));
        assert_eq!(step.rotation_kind, Some(RotationKind::RR));
        assert_eq!(step.suggested_duration_ms, Some(ROTATION_MS));
    }

    #[test]
    fn builder_overrides() {
        let step = Step::highlight(3, "go left")
            .with_path(vec![8, 5, 3])
            .with_duration_ms(600);
        assert_eq!(step.path.as_deref(), Some(&[8, 5, 3][..]));
        assert_eq!(step.suggested_duration_ms, Some(600));
    }
}
