//! Render content trees and user lists for the terminal.

use crate::error::ApiError;
use crate::tree::Node;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Indented tree, one node per line; read-only nodes are dimmed
pub fn format_tree_text(nodes: &[Node], color: bool) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node_text(&mut out, node, 0, color);
    }
    if out.is_empty() {
        out.push_str("(nothing visible)\n");
    }
    out
}

fn write_node_text(out: &mut String, node: &Node, depth: usize, color: bool) {
    let mut line = node.label.clone();
    if let Some(owner) = &node.owner {
        line.push_str(&format!(" @{}", owner));
    }
    if node.flags.unloaded {
        line.push_str(" (not loaded)");
    }
    let tag = format!("[{}]", node.category);

    let indent = "  ".repeat(depth);
    if !color {
        out.push_str(&format!("{}{} {}\n", indent, line, tag));
    } else if node.is_read_only() {
        out.push_str(&format!("{}{} {}\n", indent, line.dimmed(), tag.dimmed()));
    } else if node.category.is_folder() {
        out.push_str(&format!("{}{} {}\n", indent, line.bold(), tag.cyan()));
    } else {
        out.push_str(&format!("{}{} {}\n", indent, line, tag.cyan()));
    }

    for child in &node.children {
        write_node_text(out, child, depth + 1, color);
    }
}

pub fn format_tree_json(nodes: &[Node]) -> Result<String, ApiError> {
    serde_json::to_string_pretty(nodes).map_err(|e| ApiError::Output(e.to_string()))
}

/// Flattened tree with one row per node
pub fn format_tree_table(nodes: &[Node]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Label", "Category", "Path", "Owner", "Access"]);

    let mut stack: Vec<(usize, &Node)> = nodes.iter().rev().map(|n| (0, n)).collect();
    while let Some((depth, node)) = stack.pop() {
        let access = match node.flags.read_only {
            Some(true) => "read-only",
            Some(false) => "full",
            None => "-",
        };
        table.add_row(vec![
            format!("{}{}", "  ".repeat(depth), node.label),
            node.category.to_string(),
            node.path.clone(),
            node.owner.clone().unwrap_or_else(|| "-".to_string()),
            access.to_string(),
        ]);
        stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
    }
    table.to_string()
}

/// User directory listing
pub fn format_users_table(users: &[(String, bool)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["User", "Administrator"]);
    for (name, admin) in users {
        table.add_row(vec![name.as_str(), if *admin { "yes" } else { "no" }]);
    }
    table.to_string()
}
