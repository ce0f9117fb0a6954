//! AVL engine: height-balanced insert/delete/find with narrated rebalancing.
//!
//! Recursive descent in both insert and delete; on unwind every ancestor
//! recomputes its height and is rotated back into balance when the balance
//! factor leaves `[-1, 1]`. Rotations relink the promoted child to the
//! demoted node's old parent and return the new subtree root; the caller (the
//! unwinding frame) reattaches it.

mod node;

pub use node::AvlNode;

use treeviz_trace::{NoopSink, RotationKind, Step, StepRecorder, StepSink};

use crate::error::InvariantError;
use crate::layout::{self, LayoutConfig, RenderNode};
use crate::print;
use crate::search::{find_min, find_node};
use crate::traversal::{self, TraversalKind};
use crate::tree::{FindReport, OpReport};
use crate::types::NodeId;

/// Height-balanced binary search tree over `i64` values.
#[derive(Debug, Default)]
pub struct AvlTree {
    arena: Vec<AvlNode>,
    root: Option<u32>,
    last_id: NodeId,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overall tree height; 0 for the empty tree.
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    /// Drop every node. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn arena(&self) -> &[AvlNode] {
        &self.arena
    }

    pub(crate) fn root(&self) -> Option<u32> {
        self.root
    }

    // ── Operations ────────────────────────────────────────────────────────

    pub fn insert(&mut self, value: i64, trace: bool) -> OpReport {
        if trace {
            let mut sink = StepRecorder::new();
            let mut report = self.insert_with(value, &mut sink);
            report.steps = Some(sink.finish());
            report
        } else {
            self.insert_with(value, &mut NoopSink)
        }
    }

    pub fn delete(&mut self, value: i64, trace: bool) -> OpReport {
        if trace {
            let mut sink = StepRecorder::new();
            let mut report = self.delete_with(value, &mut sink);
            report.steps = Some(sink.finish());
            report
        } else {
            self.delete_with(value, &mut NoopSink)
        }
    }

    pub fn find(&self, value: i64, trace: bool) -> FindReport {
        let mut path = Vec::new();
        if trace {
            let mut sink = StepRecorder::new();
            let found = find_node(&self.arena, self.root, value, &mut path, &mut sink);
            FindReport { found, path, steps: Some(sink.finish()) }
        } else {
            let found = find_node(&self.arena, self.root, value, &mut path, &mut NoopSink);
            FindReport { found, path, steps: None }
        }
    }

    pub fn traverse(&self, kind: TraversalKind) -> Vec<i64> {
        traversal::traverse(&self.arena, self.root, kind)
    }

    pub fn render_snapshot(&self) -> Vec<RenderNode> {
        self.render_snapshot_with(&LayoutConfig::default())
    }

    pub fn render_snapshot_with(&self, config: &LayoutConfig) -> Vec<RenderNode> {
        layout::layout(&self.arena, self.root, config)
    }

    pub fn print(&self) -> String {
        print::print_tree(&self.arena, self.root)
    }

    // ── Insert ────────────────────────────────────────────────────────────

    fn insert_with<S: StepSink>(&mut self, value: i64, sink: &mut S) -> OpReport {
        let Some(root) = self.root else {
            let n = self.alloc(value);
            self.root = Some(n);
            self.len = 1;
            sink.record(|| Step::highlight(value, format!("Inserted root node {value}")));
            sink.record(|| Step::update(value, format!("Tree updated with new root {value}")));
            return OpReport::ok(vec![value]);
        };

        let mut path = Vec::new();
        let (top, inserted) = self.insert_at(Some(root), value, &mut path, sink);
        self.root = Some(top);
        if inserted {
            self.len += 1;
            sink.record(|| {
                Step::update(value, format!("Node {value} inserted successfully")).with_duration_ms(800)
            });
            OpReport::ok(path)
        } else {
            OpReport::ok(path).with_message(format!("Node {value} already exists in the tree"))
        }
    }

    /// Returns the subtree root after insertion and rebalancing, plus whether
    /// a node was actually created (false on duplicate).
    fn insert_at<S: StepSink>(
        &mut self,
        node: Option<u32>,
        value: i64,
        path: &mut Vec<i64>,
        sink: &mut S,
    ) -> (u32, bool) {
        let Some(i) = node else {
            sink.record(|| Step::highlight(value, format!("Found insertion point for node {value}")));
            return (self.alloc(value), true);
        };

        let here = self.value_of(i);
        path.push(here);
        sink.record(|| Step::comparison(here, value, format!("Comparing {value} with {here}")));

        if value < here {
            sink.record(|| {
                Step::highlight(here, format!("{value} < {here}, going to left subtree"))
                    .with_path(path.clone())
            });
            let (child, inserted) = self.insert_at(self.arena[i as usize].l, value, path, sink);
            self.arena[i as usize].l = Some(child);
            self.arena[child as usize].p = Some(i);
            if !inserted {
                return (i, false);
            }
            sink.record(|| Step::update(value, format!("Connected node {value} to parent {here}")));
            (self.rebalance(i, sink), true)
        } else if value > here {
            sink.record(|| {
                Step::highlight(here, format!("{value} > {here}, going to right subtree"))
                    .with_path(path.clone())
            });
            let (child, inserted) = self.insert_at(self.arena[i as usize].r, value, path, sink);
            self.arena[i as usize].r = Some(child);
            self.arena[child as usize].p = Some(i);
            if !inserted {
                return (i, false);
            }
            sink.record(|| Step::update(value, format!("Connected node {value} to parent {here}")));
            (self.rebalance(i, sink), true)
        } else {
            sink.record(|| {
                Step::highlight(here, format!("Node {value} already exists in the tree"))
                    .with_path(path.clone())
            });
            (i, false)
        }
    }

    // ── Delete ────────────────────────────────────────────────────────────

    fn delete_with<S: StepSink>(&mut self, value: i64, sink: &mut S) -> OpReport {
        if self.root.is_none() {
            return OpReport::fail("Tree is empty");
        }
        if !find_node(&self.arena, self.root, value, &mut Vec::new(), &mut NoopSink) {
            sink.record(|| Step::highlight(value, format!("Node {value} not found for deletion")));
            return OpReport::fail(format!("Node {value} not found"));
        }

        let mut path = Vec::new();
        let (top, _) = self.delete_at(self.root, value, &mut path, sink);
        self.root = top;
        if let Some(top) = top {
            self.arena[top as usize].p = None;
        }
        self.len -= 1;
        sink.record(|| {
            Step::update(0, format!("Node {value} deleted successfully")).with_duration_ms(800)
        });
        OpReport::ok(path)
    }

    /// Returns the subtree root after removal and rebalancing, plus whether a
    /// node was excised below this frame.
    fn delete_at<S: StepSink>(
        &mut self,
        node: Option<u32>,
        value: i64,
        path: &mut Vec<i64>,
        sink: &mut S,
    ) -> (Option<u32>, bool) {
        let Some(i) = node else {
            sink.record(|| Step::highlight(value, format!("Node {value} not found for deletion")));
            return (None, false);
        };

        let here = self.value_of(i);
        path.push(here);
        sink.record(|| Step::comparison(here, value, format!("Comparing {value} with {here}")));

        let removed;
        if value < here {
            sink.record(|| {
                Step::highlight(here, format!("{value} < {here}, searching in left subtree"))
                    .with_path(path.clone())
            });
            let (child, r) = self.delete_at(self.arena[i as usize].l, value, path, sink);
            removed = r;
            self.arena[i as usize].l = child;
            if let Some(c) = child {
                self.arena[c as usize].p = Some(i);
            }
            sink.record(|| Step::update(here, format!("Updated left subtree of node {here}")));
        } else if value > here {
            sink.record(|| {
                Step::highlight(here, format!("{value} > {here}, searching in right subtree"))
                    .with_path(path.clone())
            });
            let (child, r) = self.delete_at(self.arena[i as usize].r, value, path, sink);
            removed = r;
            self.arena[i as usize].r = child;
            if let Some(c) = child {
                self.arena[c as usize].p = Some(i);
            }
            sink.record(|| Step::update(here, format!("Updated right subtree of node {here}")));
        } else {
            sink.record(|| {
                Step::highlight(here, format!("Found node {value} to delete")).with_path(path.clone())
            });

            let l = self.arena[i as usize].l;
            let r = self.arena[i as usize].r;

            if l.is_none() {
                sink.record(|| {
                    Step::highlight(
                        here,
                        format!("Node {value} has no left child, replacing with right child"),
                    )
                });
                sink.record(|| {
                    let replacement = r.map(|c| self.value_of(c)).unwrap_or(0);
                    Step::update(replacement, format!("Removed node {value} from the tree"))
                        .with_duration_ms(800)
                });
                self.detach(i);
                return (r, true);
            }
            if r.is_none() {
                let left = l.expect("node with no right child keeps its left child");
                sink.record(|| {
                    Step::highlight(
                        here,
                        format!("Node {value} has no right child, replacing with left child"),
                    )
                });
                sink.record(|| {
                    Step::update(self.value_of(left), format!("Removed node {value} from the tree"))
                        .with_duration_ms(800)
                });
                self.detach(i);
                return (l, true);
            }

            sink.record(|| {
                Step::highlight(
                    here,
                    format!("Node {value} has two children, finding inorder successor"),
                )
            });
            let right = r.expect("two-child node has a right child");
            let successor = find_min(&self.arena, right, sink);
            let successor_value = self.value_of(successor);
            sink.record(|| {
                Step::highlight(
                    successor_value,
                    format!("Replacing node {here} with inorder successor {successor_value}"),
                )
            });
            // The successor's value moves into this slot; the id stays.
            self.arena[i as usize].value = successor_value;
            sink.record(|| {
                Step::highlight(
                    successor_value,
                    format!(
                        "Now deleting the inorder successor {successor_value} from its original position"
                    ),
                )
            });
            let (child, _) = self.delete_at(Some(right), successor_value, path, sink);
            self.arena[i as usize].r = child;
            if let Some(c) = child {
                self.arena[c as usize].p = Some(i);
            }
            sink.record(|| {
                Step::update(
                    successor_value,
                    format!("Replaced deleted node with successor {successor_value}"),
                )
            });
            removed = true;
        }

        let here = self.value_of(i);
        sink.record(|| Step::highlight(here, format!("Checking balance after deletion at node {here}")));
        (Some(self.rebalance(i, sink)), removed)
    }

    // ── Rebalancing ───────────────────────────────────────────────────────

    /// Recompute the height at `node`, narrate the balance check, and rotate
    /// if the balance factor left `[-1, 1]`. Returns the subtree root.
    fn rebalance<S: StepSink>(&mut self, node: u32, sink: &mut S) -> u32 {
        self.update_height(node);
        let balance = self.balance_of(node);
        let here = self.value_of(node);
        sink.record(|| {
            Step::highlight(here, format!("Checking balance factor at node {here}: {balance}"))
                .with_path(vec![here])
        });

        if balance > 1 {
            let l = self.arena[node as usize].l.expect("left-heavy node has a left child");
            let left_value = self.value_of(l);
            if self.balance_of(l) < 0 {
                sink.record(|| {
                    Step::rotation(
                        here,
                        format!("Left-Right case detected at node {here}"),
                        vec![here, left_value],
                        RotationKind::LR,
                    )
                    .with_duration_ms(800)
                });
                let new_l = self.rotate_left(l, sink);
                self.arena[node as usize].l = Some(new_l);
                return self.rotate_right(node, sink);
            }
            sink.record(|| {
                Step::rotation(
                    here,
                    format!("Left-Left case detected at node {here}"),
                    vec![here, left_value],
                    RotationKind::LL,
                )
                .with_duration_ms(800)
            });
            return self.rotate_right(node, sink);
        }

        if balance < -1 {
            let r = self.arena[node as usize].r.expect("right-heavy node has a right child");
            let right_value = self.value_of(r);
            if self.balance_of(r) > 0 {
                sink.record(|| {
                    Step::rotation(
                        here,
                        format!("Right-Left case detected at node {here}"),
                        vec![here, right_value],
                        RotationKind::RL,
                    )
                    .with_duration_ms(800)
                });
                let new_r = self.rotate_right(r, sink);
                self.arena[node as usize].r = Some(new_r);
                return self.rotate_left(node, sink);
            }
            sink.record(|| {
                Step::rotation(
                    here,
                    format!("Right-Right case detected at node {here}"),
                    vec![here, right_value],
                    RotationKind::RR,
                )
                .with_duration_ms(800)
            });
            return self.rotate_left(node, sink);
        }

        node
    }

    /// Right rotation pivoting at `y`: the left child is promoted. Heights of
    /// the repositioned pair are recomputed demoted-first. Returns the new
    /// subtree root; the caller reattaches it.
    fn rotate_right<S: StepSink>(&mut self, y: u32, sink: &mut S) -> u32 {
        let x = self.arena[y as usize].l.expect("right rotation requires a left child");
        let y_value = self.value_of(y);
        let x_value = self.value_of(x);
        sink.record(|| {
            Step::rotation(
                y_value,
                format!("Right rotation at node {y_value}"),
                vec![y_value, x_value],
                RotationKind::LL,
            )
        });

        let t2 = self.arena[x as usize].r;
        self.arena[x as usize].r = Some(y);
        self.arena[y as usize].l = t2;
        let yp = self.arena[y as usize].p;
        self.arena[x as usize].p = yp;
        self.arena[y as usize].p = Some(x);
        if let Some(t2) = t2 {
            self.arena[t2 as usize].p = Some(y);
        }

        self.update_height(y);
        self.update_height(x);

        sink.record(|| Step::update(x_value, "Tree updated after right rotation"));
        x
    }

    /// Left rotation pivoting at `x`: the right child is promoted.
    fn rotate_left<S: StepSink>(&mut self, x: u32, sink: &mut S) -> u32 {
        let y = self.arena[x as usize].r.expect("left rotation requires a right child");
        let x_value = self.value_of(x);
        let y_value = self.value_of(y);
        sink.record(|| {
            Step::rotation(
                x_value,
                format!("Left rotation at node {x_value}"),
                vec![x_value, y_value],
                RotationKind::RR,
            )
        });

        let t2 = self.arena[y as usize].l;
        self.arena[y as usize].l = Some(x);
        self.arena[x as usize].r = t2;
        let xp = self.arena[x as usize].p;
        self.arena[y as usize].p = xp;
        self.arena[x as usize].p = Some(y);
        if let Some(t2) = t2 {
            self.arena[t2 as usize].p = Some(x);
        }

        self.update_height(x);
        self.update_height(y);

        sink.record(|| Step::update(y_value, "Tree updated after left rotation"));
        y
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Walk the whole structure and check every AVL invariant: parent links,
    /// stored heights, the balance bound, and strict in-order ascent. `Err`
    /// means a defect in the engine, never a user-facing condition.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.arena[root as usize].p.is_some() {
            return Err(InvariantError::RootHasParent);
        }
        self.validate_subtree(root)?;
        let values = self.traverse(TraversalKind::InOrder);
        for pair in values.windows(2) {
            if pair[0] >= pair[1] {
                return Err(InvariantError::OrderViolation { prev: pair[0], next: pair[1] });
            }
        }
        Ok(())
    }

    /// Checks links, heights, and balance below `i`; returns the computed
    /// height of the subtree.
    fn validate_subtree(&self, i: u32) -> Result<u32, InvariantError> {
        let value = self.value_of(i);
        let l = self.arena[i as usize].l;
        let r = self.arena[i as usize].r;

        if let Some(l) = l {
            if self.arena[l as usize].p != Some(i) {
                return Err(InvariantError::BrokenParentLink(value));
            }
        }
        if let Some(r) = r {
            if self.arena[r as usize].p != Some(i) {
                return Err(InvariantError::BrokenParentLink(value));
            }
        }

        let lh = match l {
            Some(l) => self.validate_subtree(l)?,
            None => 0,
        };
        let rh = match r {
            Some(r) => self.validate_subtree(r)?,
            None => 0,
        };

        let computed = 1 + lh.max(rh);
        let stored = self.arena[i as usize].height;
        if stored != computed {
            return Err(InvariantError::HeightMismatch { value, stored, computed });
        }
        let balance = lh as i32 - rh as i32;
        if !(-1..=1).contains(&balance) {
            return Err(InvariantError::BalanceOutOfRange { value, balance });
        }
        Ok(computed)
    }

    // ── Arena plumbing ────────────────────────────────────────────────────

    fn alloc(&mut self, value: i64) -> u32 {
        self.last_id += 1;
        let idx = self.arena.len() as u32;
        self.arena.push(AvlNode::new(self.last_id, value));
        idx
    }

    /// Null out the links of an excised node; its slot stays as a tombstone.
    fn detach(&mut self, i: u32) {
        let n = &mut self.arena[i as usize];
        n.p = None;
        n.l = None;
        n.r = None;
    }

    #[inline]
    fn value_of(&self, i: u32) -> i64 {
        self.arena[i as usize].value
    }

    #[inline]
    fn height_of(&self, link: Option<u32>) -> u32 {
        link.map(|i| self.arena[i as usize].height).unwrap_or(0)
    }

    #[inline]
    fn update_height(&mut self, i: u32) {
        let h = 1 + self
            .height_of(self.arena[i as usize].l)
            .max(self.height_of(self.arena[i as usize].r));
        self.arena[i as usize].height = h;
    }

    #[inline]
    fn balance_of(&self, i: u32) -> i32 {
        self.height_of(self.arena[i as usize].l) as i32
            - self.height_of(self.arena[i as usize].r) as i32
    }
}
