//! Structural ASCII printer for debugging and the CLI `print` command.
//!
//! Root-first with branch glyphs; every child line is prefixed with its side
//! so a lone left child cannot be mistaken for a right one. Node labels carry
//! the engine's balance metadata (height and balance factor, or color).

use crate::types::{Link, VisualNode};

/// Render the whole tree as indented text. An empty tree prints `(empty)`.
pub fn print_tree<N: VisualNode>(arena: &[N], root: Option<u32>) -> String {
    let Some(root) = root else {
        return "(empty)".to_string();
    };
    let mut out = label(arena, root);
    print_below(arena, root, "", &mut out);
    out
}

fn label<N: VisualNode>(arena: &[N], i: u32) -> String {
    let n = &arena[i as usize];
    let deco = n.decorate(arena);
    let mut s = n.value().to_string();
    if let (Some(h), Some(bf)) = (deco.height, deco.balance_factor) {
        s.push_str(&format!(" [h={h} bf={bf}]"));
    }
    if let Some(color) = deco.color {
        s.push_str(&format!(" ({})", color.as_str()));
    }
    s
}

fn print_below<N: VisualNode>(arena: &[N], node: u32, tab: &str, out: &mut String) {
    let n = &arena[node as usize];
    let children: Vec<(char, u32)> = [('L', n.l()), ('R', n.r())]
        .into_iter()
        .filter_map(|(side, link)| link.map(|i| (side, i)))
        .collect();

    for (i, (side, child)) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let branch = if is_last { "└── " } else { "├── " };
        let child_tab = format!("{tab}{}", if is_last { "    " } else { "│   " });

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        out.push(*side);
        out.push(' ');
        out.push_str(&label(arena, *child));
        print_below(arena, *child, &child_tab, out);
    }
}
