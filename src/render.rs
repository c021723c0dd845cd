//! Text rendering of trees and code tables.
//!
//! Presentation-only collaborator surface: invoked after a successful
//! compression to show the user what was built, never required for
//! round-trip correctness.

use crate::code::CodeTable;
use crate::tree::{Node, Tree};
use slotmap::DefaultKey;
use std::fmt::Write;

/// Renders the tree as an indented diagram, one node per line.
///
/// Leaves show their symbol and weight, internal nodes their weight; edge
/// labels mark the 0 (left) and 1 (right) branches.
pub fn tree_diagram(tree: &Tree) -> String {
    let mut out = String::new();
    write_node(tree, tree.root(), 0, "root", &mut out);
    out
}

fn write_node(tree: &Tree, key: DefaultKey, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    match tree.node(key) {
        Some(Node::Leaf { symbol, weight }) => {
            let _ = writeln!(
                out,
                "{}{} -> leaf {} [weight {}]",
                indent,
                label,
                display_symbol(*symbol),
                weight
            );
        }
        Some(Node::Internal {
            weight,
            left,
            right,
        }) => {
            let _ = writeln!(out, "{}{} -> internal [weight {}]", indent, label, weight);
            write_node(tree, *left, depth + 1, "0", out);
            write_node(tree, *right, depth + 1, "1", out);
        }
        None => {
            let _ = writeln!(out, "{}{} -> <missing>", indent, label);
        }
    }
}

/// Renders the code table as a two-column listing, shortest codes first,
/// ties broken by symbol.
pub fn code_table(table: &CodeTable) -> String {
    let mut rows: Vec<(u8, crate::code::Code)> = table.iter().collect();
    rows.sort_by_key(|&(symbol, code)| (code.len, symbol));

    let mut out = String::new();
    let _ = writeln!(out, "symbol  code");
    for (symbol, code) in rows {
        let _ = writeln!(out, "{:>6}  {}", display_symbol(symbol), code);
    }
    out
}

fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "SPACE".to_string(),
        b'\n' => "'\\n'".to_string(),
        b'\t' => "'\\t'".to_string(),
        s if s.is_ascii_graphic() => format!("'{}'", s as char),
        s => format!("{:#04x}", s),
    }
}
