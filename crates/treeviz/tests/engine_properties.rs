//! Randomized checks of both engines against a set oracle, plus structural
//! properties of traversal, layout, and trace replay that must hold for any
//! workload.

use std::collections::BTreeSet;

use proptest::prelude::*;
use treeviz::{AvlTree, BalancedTree, RbTree, Step, TraceReplay, TraversalKind, TreeKind};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        // Keep randomized runs deterministic in CI so failures are reproducible.
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        max_shrink_iters: 0,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn avl_matches_set_semantics(
        ops in proptest::collection::vec((any::<bool>(), 0i64..64), 1..80)
    ) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();
        for &(insert, v) in &ops {
            if insert {
                let report = tree.insert(v, false);
                prop_assert!(report.success);
                // A duplicate succeeds but carries an explanatory message.
                prop_assert_eq!(report.message.is_none(), model.insert(v));
            } else {
                let report = tree.delete(v, false);
                prop_assert_eq!(report.success, model.remove(&v));
            }
            tree.assert_valid().unwrap();
            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.find(v, false).found, model.contains(&v));
        }
        let expected: Vec<i64> = model.iter().copied().collect();
        prop_assert_eq!(tree.traverse(TraversalKind::InOrder), expected);
    }

    #[test]
    fn rb_matches_set_semantics(
        ops in proptest::collection::vec((any::<bool>(), 0i64..64), 1..80)
    ) {
        let mut tree = RbTree::new();
        let mut model = BTreeSet::new();
        for &(insert, v) in &ops {
            if insert {
                let report = tree.insert(v, false);
                prop_assert!(report.success);
                prop_assert_eq!(report.message.is_none(), model.insert(v));
            } else {
                let report = tree.delete(v, false);
                prop_assert_eq!(report.success, model.remove(&v));
            }
            tree.assert_valid().unwrap();
            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.find(v, false).found, model.contains(&v));
        }
        let expected: Vec<i64> = model.iter().copied().collect();
        prop_assert_eq!(tree.traverse(TraversalKind::InOrder), expected);
    }

    #[test]
    fn traversals_are_views_of_the_same_tree(
        values in proptest::collection::vec(0i64..512, 0..48)
    ) {
        for kind in [TreeKind::Avl, TreeKind::RedBlack] {
            let mut tree = BalancedTree::new(kind);
            for &v in &values {
                tree.insert(v, false);
            }
            let expected: Vec<i64> = values.iter().copied().collect::<BTreeSet<_>>()
                .into_iter().collect();

            prop_assert_eq!(tree.traverse(TraversalKind::InOrder), expected.clone());
            for order in [
                TraversalKind::PreOrder,
                TraversalKind::PostOrder,
                TraversalKind::LevelOrder,
            ] {
                let mut seen = tree.traverse(order);
                prop_assert_eq!(seen.len(), tree.len());
                seen.sort_unstable();
                prop_assert_eq!(seen, expected.clone());
            }

            // Level order starts at the root, which leads the render graph.
            if !tree.is_empty() {
                let level = tree.traverse(TraversalKind::LevelOrder);
                prop_assert_eq!(level[0], tree.render_snapshot()[0].value);
            }
        }
    }

    #[test]
    fn layout_is_deterministic_and_well_linked(
        values in proptest::collection::vec(0i64..400, 1..40)
    ) {
        for kind in [TreeKind::Avl, TreeKind::RedBlack] {
            let mut tree = BalancedTree::new(kind);
            for &v in &values {
                tree.insert(v, false);
            }
            let nodes = tree.render_snapshot();
            prop_assert_eq!(nodes.len(), tree.len());
            prop_assert_eq!(nodes[0].parent, None);

            for (i, node) in nodes.iter().enumerate() {
                prop_assert!(node.x.is_finite() && node.x > 0.0);
                if let Some(l) = node.left {
                    prop_assert_eq!(nodes[l].parent, Some(i));
                    prop_assert!(nodes[l].x < node.x);
                    prop_assert_eq!(nodes[l].y, node.y + 100.0);
                }
                if let Some(r) = node.right {
                    prop_assert_eq!(nodes[r].parent, Some(i));
                    prop_assert!(nodes[r].x > node.x);
                    prop_assert_eq!(nodes[r].y, node.y + 100.0);
                }
            }

            prop_assert_eq!(tree.render_snapshot(), nodes);
        }
    }

    #[test]
    fn traces_replay_and_serialize_faithfully(
        values in proptest::collection::vec(0i64..128, 1..24)
    ) {
        let mut tree = AvlTree::new();
        let mut steps: Vec<Step> = Vec::new();
        for &v in &values {
            steps.extend(tree.insert(v, true).steps.unwrap());
        }
        steps.extend(tree.delete(values[0], true).steps.unwrap());

        let json = serde_json::to_string(&steps).unwrap();
        let back: Vec<Step> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, &steps);

        let mut replay = TraceReplay::new(steps.clone());
        let mut forward = 0usize;
        while replay.step_forward().is_some() {
            forward += 1;
        }
        prop_assert_eq!(forward, steps.len());
        prop_assert!(replay.is_finished());
        prop_assert_eq!(replay.played(), steps.as_slice());

        while replay.step_back().is_some() {}
        prop_assert_eq!(replay.position(), 0);
        prop_assert_eq!(replay.seek(steps.len() + 100), steps.len());
    }

    #[test]
    fn tracing_never_changes_the_tree(
        ops in proptest::collection::vec((any::<bool>(), 0i64..48), 1..48)
    ) {
        for kind in [TreeKind::Avl, TreeKind::RedBlack] {
            let run = |trace: bool| {
                let mut tree = BalancedTree::new(kind);
                for &(insert, v) in &ops {
                    if insert {
                        tree.insert(v, trace);
                    } else {
                        tree.delete(v, trace);
                    }
                }
                (tree.len(), tree.render_snapshot())
            };
            prop_assert_eq!(run(true), run(false));
        }
    }
}
