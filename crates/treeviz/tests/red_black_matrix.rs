use treeviz::{Color, RbTree, TraversalKind};

fn colors(tree: &RbTree) -> Vec<(i64, Color)> {
    let nodes = tree.render_snapshot();
    let mut out: Vec<(i64, Color)> =
        nodes.iter().map(|n| (n.value, n.color.expect("rb nodes carry color"))).collect();
    out.sort_unstable_by_key(|(v, _)| *v);
    out
}

#[test]
fn rb_smoke_matrix() {
    let mut tree = RbTree::new();
    for v in [5, 3, 8, 1, 4, 7, 9] {
        assert!(tree.insert(v, false).success);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.traverse(TraversalKind::InOrder), vec![1, 3, 4, 5, 7, 8, 9]);
    assert!(tree.find(4, false).found);
    assert!(!tree.find(6, false).found);
}

#[test]
fn bootstrap_and_recolor_matrix() {
    let mut tree = RbTree::new();
    tree.insert(10, false);
    assert_eq!(colors(&tree), vec![(10, Color::Black)]);

    tree.insert(5, false);
    tree.insert(15, false);
    assert_eq!(
        colors(&tree),
        vec![(5, Color::Red), (10, Color::Black), (15, Color::Red)]
    );

    // Red uncle: recolor rather than rotate, then repaint the root.
    tree.insert(3, false);
    assert_eq!(
        colors(&tree),
        vec![(3, Color::Red), (5, Color::Black), (10, Color::Black), (15, Color::Black)]
    );
    tree.assert_valid().unwrap();
}

#[test]
fn ascending_workload_matrix() {
    let mut tree = RbTree::new();
    for v in 1..=64 {
        assert!(tree.insert(v, false).success);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 64);
    assert_eq!(tree.traverse(TraversalKind::InOrder), (1..=64).collect::<Vec<i64>>());
    // Red-black height is at most 2·log2(n+1).
    assert!(tree.height() <= 12, "height {} exceeds red-black bound", tree.height());
}

#[test]
fn descending_workload_matrix() {
    let mut tree = RbTree::new();
    for v in (1..=64).rev() {
        assert!(tree.insert(v, false).success);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.traverse(TraversalKind::InOrder), (1..=64).collect::<Vec<i64>>());
}

#[test]
fn delete_case_coverage_matrix() {
    // Interleaved inserts and deletes push the fixup through its sibling
    // cases; validity is re-checked after every mutation.
    let mut tree = RbTree::new();
    for v in [41, 38, 31, 12, 19, 8] {
        tree.insert(v, false);
        tree.assert_valid().unwrap();
    }
    for v in [8, 12, 19, 31, 38, 41] {
        assert!(tree.delete(v, false).success);
        tree.assert_valid().unwrap();
    }
    assert!(tree.is_empty());

    let mut tree = RbTree::new();
    for v in 1..=32 {
        tree.insert(v, false);
    }
    for v in (1..=32).step_by(2) {
        assert!(tree.delete(v, false).success);
        tree.assert_valid().unwrap();
    }
    assert_eq!(
        tree.traverse(TraversalKind::InOrder),
        (2..=32).step_by(2).collect::<Vec<i64>>()
    );
}

#[test]
fn successor_splice_matrix() {
    let mut tree = RbTree::new();
    for v in [20, 10, 30, 25, 40] {
        tree.insert(v, false);
    }
    // Deleting the root promotes 25, the leftmost node of the right subtree.
    assert!(tree.delete(20, false).success);
    assert_eq!(tree.render_snapshot()[0].value, 25);
    assert_eq!(tree.traverse(TraversalKind::InOrder), vec![10, 25, 30, 40]);
    tree.assert_valid().unwrap();

    // Distant successor: 30's replacement is two levels down.
    let mut tree = RbTree::new();
    for v in [30, 10, 50, 40, 60, 35] {
        tree.insert(v, false);
    }
    assert!(tree.delete(30, false).success);
    assert_eq!(tree.traverse(TraversalKind::InOrder), vec![10, 35, 40, 50, 60]);
    tree.assert_valid().unwrap();
}

#[test]
fn duplicate_and_missing_values_matrix() {
    let mut tree = RbTree::new();
    for v in [10, 5, 15] {
        tree.insert(v, false);
    }

    let report = tree.insert(5, true);
    assert!(report.success);
    assert_eq!(report.message.as_deref(), Some("Node 5 already exists in the tree"));
    assert_eq!(report.path.as_deref(), Some(&[10, 5][..]));
    assert_eq!(tree.len(), 3);

    assert!(!tree.delete(6, false).success);
    assert!(!RbTree::new().delete(1, false).success);
}

#[test]
fn mixed_churn_matrix() {
    let mut tree = RbTree::new();
    for round in 0..4 {
        for v in 0..24 {
            tree.insert(v * 4 + round, false);
        }
        for v in 0..12 {
            assert!(tree.delete(v * 8 + round, false).success);
        }
        tree.assert_valid().unwrap();
    }
    let inorder = tree.traverse(TraversalKind::InOrder);
    assert_eq!(inorder.len(), tree.len());
    assert!(inorder.windows(2).all(|w| w[0] < w[1]));
}
