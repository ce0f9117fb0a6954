//! Shared descent helpers: traced find and the minimum-value scan.
//!
//! Both engines narrate these identically, so they are written once over
//! [`VisualNode`]. Quiet callers pass a [`NoopSink`] and pay nothing for the
//! narration.
//!
//! [`NoopSink`]: treeviz_trace::NoopSink

use treeviz_trace::{Step, StepSink};

use crate::types::VisualNode;

/// Traced recursive find. Pushes every visited value onto `path` and reports
/// whether `value` is present.
pub(crate) fn find_node<N, S>(
    arena: &[N],
    node: Option<u32>,
    value: i64,
    path: &mut Vec<i64>,
    sink: &mut S,
) -> bool
where
    N: VisualNode,
    S: StepSink,
{
    let Some(i) = node else {
        sink.record(|| Step::highlight(value, format!("Search complete: Node {value} not found")));
        return false;
    };

    let here = arena[i as usize].value();
    path.push(here);
    sink.record(|| Step::comparison(here, value, format!("Comparing {value} with {here}")));

    if value == here {
        sink.record(|| {
            Step::highlight(here, format!("Found node {value}!"))
                .with_path(path.clone())
                .with_duration_ms(1000)
        });
        return true;
    }

    if value < here {
        sink.record(|| {
            Step::highlight(here, format!("{value} < {here}, searching in left subtree"))
                .with_path(path.clone())
        });
        find_node(arena, arena[i as usize].l(), value, path, sink)
    } else {
        sink.record(|| {
            Step::highlight(here, format!("{value} > {here}, searching in right subtree"))
                .with_path(path.clone())
        });
        find_node(arena, arena[i as usize].r(), value, path, sink)
    }
}

/// Minimum-value scan, used by delete to locate the in-order successor of a
/// two-child node. `node` is the root of the subtree to scan.
pub(crate) fn find_min<N, S>(arena: &[N], node: u32, sink: &mut S) -> u32
where
    N: VisualNode,
    S: StepSink,
{
    let mut curr = node;
    sink.record(|| {
        let v = arena[curr as usize].value();
        Step::highlight(v, format!("Finding minimum value in the subtree rooted at {v}"))
    });

    while let Some(l) = arena[curr as usize].l() {
        sink.record(|| {
            let v = arena[curr as usize].value();
            Step::check(v, format!("Checking if {v} has a left child")).with_duration_ms(600)
        });
        curr = l;
        sink.record(|| {
            let v = arena[curr as usize].value();
            Step::highlight(v, format!("Moving to left child: {v}")).with_duration_ms(600)
        });
    }

    sink.record(|| {
        let v = arena[curr as usize].value();
        Step::highlight(v, format!("Found minimum value: {v}"))
    });

    curr
}
