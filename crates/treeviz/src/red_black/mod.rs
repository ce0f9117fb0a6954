//! Red-black engine: classic recolor-and-rotate balancing with narrated
//! fixup cases.
//!
//! Both insert and delete descend iteratively, splice in place, and then walk
//! back up restoring the red-black rules. Absent links stand for the black
//! nil sentinel, so the delete fixup carries the parent of the doubly-black
//! position alongside the position itself.

mod node;

pub use node::RbNode;

use treeviz_trace::{NoopSink, RotationKind, Step, StepRecorder, StepSink};

use crate::error::InvariantError;
use crate::layout::{self, LayoutConfig, RenderNode};
use crate::print;
use crate::search::{find_min, find_node};
use crate::traversal::{self, TraversalKind};
use crate::tree::{FindReport, OpReport};
use crate::types::{Color, NodeId};

/// Red-black binary search tree over `i64` values.
#[derive(Debug, Default)]
pub struct RbTree {
    arena: Vec<RbNode>,
    root: Option<u32>,
    last_id: NodeId,
    len: usize,
}

impl RbTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overall tree height; 0 for the empty tree. Computed on demand, the
    /// nodes store no height field.
    pub fn height(&self) -> u32 {
        self.subtree_height(self.root)
    }

    /// Drop every node. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn arena(&self) -> &[RbNode] {
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
            sink.record(|| Step::highlight(value, format!("Inserting root node {value}")));
            let n = self.alloc(value);
            self.arena[n as usize].color = Color::Black;
            self.root = Some(n);
            self.len = 1;
            sink.record(|| Step::update(value, format!("Tree updated with new root {value}")));
            return OpReport::ok(vec![value]);
        };

        let mut current = root;
        let new = loop {
            let here = self.value_of(current);
            sink.record(|| Step::comparison(here, value, format!("Comparing {value} with {here}")));
            if value < here {
                sink.record(|| {
                    Step::highlight(here, format!("{value} < {here}, going to left subtree"))
                });
                match self.arena[current as usize].l {
                    Some(l) => current = l,
                    None => {
                        let n = self.alloc(value);
                        self.arena[n as usize].p = Some(current);
                        self.arena[current as usize].l = Some(n);
                        sink.record(|| {
                            Step::highlight(value, format!("Inserted {value} as left child of {here}"))
                        });
                        break n;
                    }
                }
            } else if value > here {
                sink.record(|| {
                    Step::highlight(here, format!("{value} > {here}, going to right subtree"))
                });
                match self.arena[current as usize].r {
                    Some(r) => current = r,
                    None => {
                        let n = self.alloc(value);
                        self.arena[n as usize].p = Some(current);
                        self.arena[current as usize].r = Some(n);
                        sink.record(|| {
                            Step::highlight(value, format!("Inserted {value} as right child of {here}"))
                        });
                        break n;
                    }
                }
            } else {
                sink.record(|| {
                    Step::highlight(here, format!("Node {value} already exists in the tree"))
                });
                return OpReport::ok(self.path_to(value))
                    .with_message(format!("Node {value} already exists in the tree"));
            }
        };

        sink.record(|| Step::highlight(value, "Checking Red-Black tree properties after insertion"));
        self.insert_fixup(new, sink);
        self.len += 1;
        sink.record(|| {
            Step::update(value, format!("Node {value} inserted successfully")).with_duration_ms(800)
        });
        OpReport::ok(self.path_to(value))
    }

    /// Walk back up from a freshly attached red node, recoloring and rotating
    /// until no red node has a red parent.
    fn insert_fixup<S: StepSink>(&mut self, mut current: u32, sink: &mut S) {
        loop {
            let Some(parent) = self.arena[current as usize].p else {
                break;
            };
            if self.arena[parent as usize].color == Color::Black {
                break;
            }
            let grandparent = self.arena[parent as usize].p.expect("red parent is not the root");

            if self.arena[grandparent as usize].l == Some(parent) {
                let uncle = self.arena[grandparent as usize].r;
                if self.is_red(uncle) {
                    let u = uncle.expect("red uncle exists");
                    let cur_v = self.value_of(current);
                    let parent_v = self.value_of(parent);
                    let uncle_v = self.value_of(u);
                    let grand_v = self.value_of(grandparent);
                    sink.record(|| {
                        Step::highlight(cur_v, "Case 1: Uncle is red - recoloring nodes")
                            .with_affected(vec![cur_v, parent_v, uncle_v, grand_v])
                    });
                    self.arena[parent as usize].color = Color::Black;
                    self.arena[u as usize].color = Color::Black;
                    self.arena[grandparent as usize].color = Color::Red;
                    current = grandparent;
                    sink.record(|| {
                        Step::update(grand_v, "Recolored nodes and moved up to grandparent")
                    });
                } else {
                    if self.arena[parent as usize].r == Some(current) {
                        let cur_v = self.value_of(current);
                        let parent_v = self.value_of(parent);
                        sink.record(|| {
                            Step::highlight(cur_v, "Case 2: Current is right child - rotate left")
                                .with_affected(vec![cur_v, parent_v])
                        });
                        current = parent;
                        self.rotate_left(current, sink);
                    }
                    let parent =
                        self.arena[current as usize].p.expect("case 3 node has a parent");
                    let grandparent =
                        self.arena[parent as usize].p.expect("case 3 node has a grandparent");
                    let cur_v = self.value_of(current);
                    let parent_v = self.value_of(parent);
                    let grand_v = self.value_of(grandparent);
                    sink.record(|| {
                        Step::highlight(cur_v, "Case 3: Current is left child - recolor and rotate right")
                            .with_affected(vec![cur_v, parent_v, grand_v])
                    });
                    self.arena[parent as usize].color = Color::Black;
                    self.arena[grandparent as usize].color = Color::Red;
                    self.rotate_right(grandparent, sink);
                }
            } else {
                let uncle = self.arena[grandparent as usize].l;
                if self.is_red(uncle) {
                    let u = uncle.expect("red uncle exists");
                    let cur_v = self.value_of(current);
                    let parent_v = self.value_of(parent);
                    let uncle_v = self.value_of(u);
                    let grand_v = self.value_of(grandparent);
                    sink.record(|| {
                        Step::highlight(cur_v, "Case 1: Uncle is red - recoloring nodes")
                            .with_affected(vec![cur_v, parent_v, uncle_v, grand_v])
                    });
                    self.arena[parent as usize].color = Color::Black;
                    self.arena[u as usize].color = Color::Black;
                    self.arena[grandparent as usize].color = Color::Red;
                    current = grandparent;
                    sink.record(|| {
                        Step::update(grand_v, "Recolored nodes and moved up to grandparent")
                    });
                } else {
                    if self.arena[parent as usize].l == Some(current) {
                        let cur_v = self.value_of(current);
                        let parent_v = self.value_of(parent);
                        sink.record(|| {
                            Step::highlight(cur_v, "Case 2: Current is left child - rotate right")
                                .with_affected(vec![cur_v, parent_v])
                        });
                        current = parent;
                        self.rotate_right(current, sink);
                    }
                    let parent =
                        self.arena[current as usize].p.expect("case 3 node has a parent");
                    let grandparent =
                        self.arena[parent as usize].p.expect("case 3 node has a grandparent");
                    let cur_v = self.value_of(current);
                    let parent_v = self.value_of(parent);
                    let grand_v = self.value_of(grandparent);
                    sink.record(|| {
                        Step::highlight(cur_v, "Case 3: Current is right child - recolor and rotate left")
                            .with_affected(vec![cur_v, parent_v, grand_v])
                    });
                    self.arena[parent as usize].color = Color::Black;
                    self.arena[grandparent as usize].color = Color::Red;
                    self.rotate_left(grandparent, sink);
                }
            }
        }

        if self.is_red(self.root) {
            let root = self.root.expect("red root exists");
            let root_v = self.value_of(root);
            sink.record(|| {
                Step::highlight(root_v, "Ensuring root is black").with_duration_ms(500)
            });
            self.arena[root as usize].color = Color::Black;
        }
    }

    // ── Delete ────────────────────────────────────────────────────────────

    fn delete_with<S: StepSink>(&mut self, value: i64, sink: &mut S) -> OpReport {
        if self.root.is_none() {
            return OpReport::fail("Tree is empty");
        }
        let mut path = Vec::new();
        if !find_node(&self.arena, self.root, value, &mut path, &mut NoopSink) {
            sink.record(|| Step::highlight(value, format!("Node {value} not found for deletion")));
            return OpReport::fail(format!("Node {value} not found"));
        }

        let mut current = self.root.expect("tree is non-empty");
        let z = loop {
            let here = self.value_of(current);
            sink.record(|| Step::comparison(here, value, format!("Comparing {value} with {here}")));
            if value < here {
                sink.record(|| {
                    Step::highlight(here, format!("{value} < {here}, searching in left subtree"))
                });
                current = self.arena[current as usize].l.expect("value sits below this node");
            } else if value > here {
                sink.record(|| {
                    Step::highlight(here, format!("{value} > {here}, searching in right subtree"))
                });
                current = self.arena[current as usize].r.expect("value sits below this node");
            } else {
                break current;
            }
        };
        sink.record(|| Step::highlight(value, format!("Found node {value} to delete")));

        self.excise(z, sink);
        self.len -= 1;
        sink.record(|| {
            Step::update(0, format!("Node {value} deleted successfully")).with_duration_ms(800)
        });
        OpReport::ok(path)
    }

    /// Splice node `z` out of the tree and restore the red-black rules if the
    /// removed color was black.
    fn excise<S: StepSink>(&mut self, z: u32, sink: &mut S) {
        let z_value = self.value_of(z);
        let mut y = z;
        let mut y_color = self.arena[y as usize].color;
        let x: Option<u32>;
        let x_parent: Option<u32>;

        let zl = self.arena[z as usize].l;
        let zr = self.arena[z as usize].r;

        if zl.is_none() {
            sink.record(|| {
                Step::highlight(
                    z_value,
                    format!("Node {z_value} has no left child, replacing with right child"),
                )
            });
            x = zr;
            x_parent = self.arena[z as usize].p;
            self.transplant(z, zr, sink);
        } else if zr.is_none() {
            sink.record(|| {
                Step::highlight(
                    z_value,
                    format!("Node {z_value} has no right child, replacing with left child"),
                )
            });
            x = zl;
            x_parent = self.arena[z as usize].p;
            self.transplant(z, zl, sink);
        } else {
            sink.record(|| {
                Step::highlight(z_value, format!("Node {z_value} has two children, finding successor"))
            });
            let zr = zr.expect("two-child node has a right child");
            let zl = zl.expect("two-child node has a left child");
            y = find_min(&self.arena, zr, sink);
            y_color = self.arena[y as usize].color;
            let y_value = self.value_of(y);
            x = self.arena[y as usize].r;

            if self.arena[y as usize].p == Some(z) {
                x_parent = Some(y);
                sink.record(|| {
                    Step::highlight(
                        y_value,
                        format!("Successor {y_value} is direct right child of {z_value}"),
                    )
                });
            } else {
                sink.record(|| {
                    Step::highlight(
                        y_value,
                        format!("Replacing successor {y_value} with its right child"),
                    )
                });
                x_parent = self.arena[y as usize].p;
                self.transplant(y, x, sink);
                self.arena[y as usize].r = Some(zr);
                self.arena[zr as usize].p = Some(y);
            }

            sink.record(|| {
                Step::highlight(z_value, format!("Replacing {z_value} with successor {y_value}"))
            });
            self.transplant(z, Some(y), sink);
            self.arena[y as usize].l = Some(zl);
            self.arena[zl as usize].p = Some(y);
            let zc = self.arena[z as usize].color;
            self.arena[y as usize].color = zc;
            sink.record(|| {
                Step::update(y_value, format!("Updated tree after replacing {z_value} with {y_value}"))
                    .with_duration_ms(800)
            });
        }

        if y_color == Color::Black {
            let focus = x.map(|i| self.value_of(i)).unwrap_or_else(|| self.value_of(y));
            sink.record(|| {
                Step::highlight(focus, "Removed a black node, need to fix Red-Black properties")
            });
            self.delete_fixup(x, x_parent, sink);
        }

        self.detach(z);
    }

    /// Swap the subtree rooted at `u` for the one rooted at `v` in `u`'s
    /// parent (or at the root).
    fn transplant<S: StepSink>(&mut self, u: u32, v: Option<u32>, sink: &mut S) {
        let up = self.arena[u as usize].p;
        match up {
            None => self.root = v,
            Some(p) => {
                if self.arena[p as usize].l == Some(u) {
                    self.arena[p as usize].l = v;
                } else {
                    self.arena[p as usize].r = v;
                }
            }
        }
        if let Some(v) = v {
            self.arena[v as usize].p = up;
        }
        let u_value = self.value_of(u);
        let focus = v.map(|i| self.value_of(i)).unwrap_or(u_value);
        sink.record(|| {
            let target = match v {
                Some(i) => self.value_of(i).to_string(),
                None => "NIL".to_string(),
            };
            Step::highlight(focus, format!("Replaced {u_value} with {target}"))
        });
    }

    /// Restore equal black heights after a black node was removed. `x` is the
    /// doubly-black position (`None` for the nil sentinel) and `x_parent` its
    /// parent, tracked separately since nil carries no links.
    fn delete_fixup<S: StepSink>(
        &mut self,
        mut x: Option<u32>,
        mut x_parent: Option<u32>,
        sink: &mut S,
    ) {
        while x != self.root && !self.is_red(x) {
            let p = x_parent.expect("double-black node below the root has a parent");
            let x_is_left = match x {
                Some(i) => self.arena[p as usize].l == Some(i),
                None => self.arena[p as usize].l.is_none(),
            };

            if x_is_left {
                let mut sibling = self.arena[p as usize].r;
                if self.is_red(sibling) {
                    let s = sibling.expect("red sibling exists");
                    let p_v = self.value_of(p);
                    let s_v = self.value_of(s);
                    sink.record(|| {
                        Step::highlight(s_v, "Case 1: Sibling is red - recolor and rotate left")
                            .with_affected(vec![p_v, s_v])
                    });
                    self.arena[s as usize].color = Color::Black;
                    self.arena[p as usize].color = Color::Red;
                    self.rotate_left(p, sink);
                    sibling = self.arena[p as usize].r;
                    sink.record(|| Step::update(p_v, "Updated tree after Case 1"));
                }

                let mut w = sibling.expect("sibling exists during double-black fixup");
                let wl = self.arena[w as usize].l;
                let wr = self.arena[w as usize].r;
                if !self.is_red(wl) && !self.is_red(wr) {
                    let w_v = self.value_of(w);
                    let p_v = self.value_of(p);
                    sink.record(|| {
                        Step::highlight(
                            w_v,
                            "Case 2: Sibling is black with black children - recolor sibling",
                        )
                        .with_affected(vec![w_v])
                    });
                    self.arena[w as usize].color = Color::Red;
                    x = Some(p);
                    x_parent = self.arena[p as usize].p;
                    sink.record(|| Step::update(p_v, "Moved up to parent after Case 2"));
                } else {
                    if !self.is_red(wr) {
                        let near = wl.expect("near nephew is red in case 3");
                        let w_v = self.value_of(w);
                        let near_v = self.value_of(near);
                        sink.record(|| {
                            Step::highlight(
                                w_v,
                                "Case 3: Sibling is black with red left child - recolor and rotate right",
                            )
                            .with_affected(vec![w_v, near_v])
                        });
                        self.arena[near as usize].color = Color::Black;
                        self.arena[w as usize].color = Color::Red;
                        self.rotate_right(w, sink);
                        w = self.arena[p as usize].r.expect("rotation placed a sibling");
                        let w_v = self.value_of(w);
                        sink.record(|| Step::update(w_v, "Updated tree after Case 3"));
                    }
                    let far = self.arena[w as usize].r.expect("far nephew is red in case 4");
                    let w_v = self.value_of(w);
                    let p_v = self.value_of(p);
                    let far_v = self.value_of(far);
                    sink.record(|| {
                        Step::highlight(
                            w_v,
                            "Case 4: Sibling is black with red right child - recolor and rotate left",
                        )
                        .with_affected(vec![w_v, p_v, far_v])
                    });
                    let pc = self.arena[p as usize].color;
                    self.arena[w as usize].color = pc;
                    self.arena[p as usize].color = Color::Black;
                    self.arena[far as usize].color = Color::Black;
                    self.rotate_left(p, sink);
                    x = self.root;
                    x_parent = None;
                    let root_v = self.root.map(|r| self.value_of(r)).unwrap_or(0);
                    sink.record(|| Step::update(root_v, "Updated tree after Case 4"));
                }
            } else {
                let mut sibling = self.arena[p as usize].l;
                if self.is_red(sibling) {
                    let s = sibling.expect("red sibling exists");
                    let p_v = self.value_of(p);
                    let s_v = self.value_of(s);
                    sink.record(|| {
                        Step::highlight(s_v, "Case 1: Sibling is red - recolor and rotate right")
                            .with_affected(vec![p_v, s_v])
                    });
                    self.arena[s as usize].color = Color::Black;
                    self.arena[p as usize].color = Color::Red;
                    self.rotate_right(p, sink);
                    sibling = self.arena[p as usize].l;
                    sink.record(|| Step::update(p_v, "Updated tree after Case 1"));
                }

                let mut w = sibling.expect("sibling exists during double-black fixup");
                let wl = self.arena[w as usize].l;
                let wr = self.arena[w as usize].r;
                if !self.is_red(wl) && !self.is_red(wr) {
                    let w_v = self.value_of(w);
                    let p_v = self.value_of(p);
                    sink.record(|| {
                        Step::highlight(
                            w_v,
                            "Case 2: Sibling is black with black children - recolor sibling",
                        )
                        .with_affected(vec![w_v])
                    });
                    self.arena[w as usize].color = Color::Red;
                    x = Some(p);
                    x_parent = self.arena[p as usize].p;
                    sink.record(|| Step::update(p_v, "Moved up to parent after Case 2"));
                } else {
                    if !self.is_red(wl) {
                        let near = wr.expect("near nephew is red in case 3");
                        let w_v = self.value_of(w);
                        let near_v = self.value_of(near);
                        sink.record(|| {
                            Step::highlight(
                                w_v,
                                "Case 3: Sibling is black with red right child - recolor and rotate left",
                            )
                            .with_affected(vec![w_v, near_v])
                        });
                        self.arena[near as usize].color = Color::Black;
                        self.arena[w as usize].color = Color::Red;
                        self.rotate_left(w, sink);
                        w = self.arena[p as usize].l.expect("rotation placed a sibling");
                        let w_v = self.value_of(w);
                        sink.record(|| Step::update(w_v, "Updated tree after Case 3"));
                    }
                    let far = self.arena[w as usize].l.expect("far nephew is red in case 4");
                    let w_v = self.value_of(w);
                    let p_v = self.value_of(p);
                    let far_v = self.value_of(far);
                    sink.record(|| {
                        Step::highlight(
                            w_v,
                            "Case 4: Sibling is black with red left child - recolor and rotate right",
                        )
                        .with_affected(vec![w_v, p_v, far_v])
                    });
                    let pc = self.arena[p as usize].color;
                    self.arena[w as usize].color = pc;
                    self.arena[p as usize].color = Color::Black;
                    self.arena[far as usize].color = Color::Black;
                    self.rotate_right(p, sink);
                    x = self.root;
                    x_parent = None;
                    let root_v = self.root.map(|r| self.value_of(r)).unwrap_or(0);
                    sink.record(|| Step::update(root_v, "Updated tree after Case 4"));
                }
            }
        }

        if let Some(x) = x {
            self.arena[x as usize].color = Color::Black;
        }
    }

    // ── Rotations ─────────────────────────────────────────────────────────

    /// Left rotation pivoting at `x`: the right child is promoted in place,
    /// parent hook and root pointer included.
    fn rotate_left<S: StepSink>(&mut self, x: u32, sink: &mut S) {
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
        self.arena[x as usize].r = t2;
        if let Some(t2) = t2 {
            self.arena[t2 as usize].p = Some(x);
        }
        let xp = self.arena[x as usize].p;
        self.arena[y as usize].p = xp;
        match xp {
            None => self.root = Some(y),
            Some(p) => {
                if self.arena[p as usize].l == Some(x) {
                    self.arena[p as usize].l = Some(y);
                } else {
                    self.arena[p as usize].r = Some(y);
                }
            }
        }
        self.arena[y as usize].l = Some(x);
        self.arena[x as usize].p = Some(y);

        sink.record(|| Step::update(y_value, "Tree updated after left rotation"));
    }

    /// Right rotation pivoting at `y`: the left child is promoted in place.
    fn rotate_right<S: StepSink>(&mut self, y: u32, sink: &mut S) {
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
        self.arena[y as usize].l = t2;
        if let Some(t2) = t2 {
            self.arena[t2 as usize].p = Some(y);
        }
        let yp = self.arena[y as usize].p;
        self.arena[x as usize].p = yp;
        match yp {
            None => self.root = Some(x),
            Some(p) => {
                if self.arena[p as usize].l == Some(y) {
                    self.arena[p as usize].l = Some(x);
                } else {
                    self.arena[p as usize].r = Some(x);
                }
            }
        }
        self.arena[x as usize].r = Some(y);
        self.arena[y as usize].p = Some(x);

        sink.record(|| Step::update(x_value, "Tree updated after right rotation"));
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Walk the whole structure and check every red-black invariant: parent
    /// links, black root, no red-red edge, equal black heights, and strict
    /// in-order ascent. `Err` means a defect in the engine.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.arena[root as usize].p.is_some() {
            return Err(InvariantError::RootHasParent);
        }
        if self.arena[root as usize].color != Color::Black {
            return Err(InvariantError::RootNotBlack);
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

    /// Checks links and color rules below `i`; returns the black height of
    /// the subtree counting nil as 1.
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

        if self.arena[i as usize].color == Color::Red && (self.is_red(l) || self.is_red(r)) {
            return Err(InvariantError::RedRedEdge(value));
        }

        let lbh = match l {
            Some(l) => self.validate_subtree(l)?,
            None => 1,
        };
        let rbh = match r {
            Some(r) => self.validate_subtree(r)?,
            None => 1,
        };
        if lbh != rbh {
            return Err(InvariantError::BlackHeightMismatch(value));
        }
        Ok(lbh + u32::from(self.arena[i as usize].color == Color::Black))
    }

    // ── Arena plumbing ────────────────────────────────────────────────────

    fn alloc(&mut self, value: i64) -> u32 {
        self.last_id += 1;
        let idx = self.arena.len() as u32;
        self.arena.push(RbNode::new(self.last_id, value));
        idx
    }

    /// Null out the links of an excised node; its slot stays as a tombstone.
    fn detach(&mut self, i: u32) {
        let n = &mut self.arena[i as usize];
        n.p = None;
        n.l = None;
        n.r = None;
    }

    /// Root-to-node value path without emitting steps.
    fn path_to(&self, value: i64) -> Vec<i64> {
        let mut path = Vec::new();
        find_node(&self.arena, self.root, value, &mut path, &mut NoopSink);
        path
    }

    #[inline]
    fn value_of(&self, i: u32) -> i64 {
        self.arena[i as usize].value
    }

    /// Absent links are the nil sentinel and count as black.
    #[inline]
    fn is_red(&self, link: Option<u32>) -> bool {
        link.map(|i| self.arena[i as usize].color == Color::Red).unwrap_or(false)
    }

    fn subtree_height(&self, link: Option<u32>) -> u32 {
        match link {
            None => 0,
            Some(i) => {
                1 + self
                    .subtree_height(self.arena[i as usize].l)
                    .max(self.subtree_height(self.arena[i as usize].r))
            }
        }
    }
}
