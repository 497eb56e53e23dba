//! Plain-text rendering of instruction tables and outlines.

use crate::parser::value::ObjectArena;
use crate::parser::ParsedTrace;
use crate::view::outline::OutlineNode;
use std::fmt::Write;

/// Render one line per instruction: index, fn, op and the four operands
///
/// **Public** - used by `list` and `search`
pub fn render_table(trace: &ParsedTrace, indices: &[usize]) -> String {
    let mut out = String::new();
    for row in indices.iter().filter_map(|&index| trace.row(index)) {
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<12} {}",
            row.index,
            row.function,
            row.op,
            row.args.join("  ")
        );
    }
    out
}

/// Expand outline nodes as an indented tree
///
/// **Public** - the text counterpart of "expand all"
///
/// # Arguments
/// * `nodes` - Top-level nodes
/// * `arena` - Arena the nodes' references point into
/// * `max_depth` - Levels to expand below the top level; deeper nodes that
///   still have children are marked with `...`
pub fn render_outline(nodes: &[OutlineNode<'_>], arena: &ObjectArena, max_depth: usize) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, arena, 0, max_depth, &mut out);
    }
    out
}

/// **Private** - depth-first writer
fn render_node(
    node: &OutlineNode<'_>,
    arena: &ObjectArena,
    depth: usize,
    max_depth: usize,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);

    if node.is_leaf() {
        let _ = writeln!(out, "{}{}", indent, node.display_label());
        return;
    }

    if depth >= max_depth {
        let _ = writeln!(out, "{}{} ...", indent, node.display_label());
        return;
    }

    let _ = writeln!(out, "{}{}", indent, node.display_label());
    let Some(value) = node.value() else {
        return;
    };
    // The node's own label is the key; show what it holds when that says more
    let kind = value.label(arena);
    if kind != node.label() {
        let _ = writeln!(out, "{}  ({})", indent, kind);
    }
    for child in node.children(arena) {
        render_node(&child, arena, depth + 1, max_depth, out);
    }
}
