//! Search Filter
//!
//! Label search over an already-redacted tree. A node is kept when its label
//! contains the filter, when any descendant is kept, or when it sits under a
//! node whose label equals the filter exactly. Comparisons are
//! case-insensitive on NFC-normalised labels.

use crate::tree::Node;
use unicode_normalization::UnicodeNormalization;

/// Normalised, lowercased form used for every label comparison
pub fn fold_label(label: &str) -> String {
    label.nfc().collect::<String>().to_lowercase()
}

pub fn search(node: &Node, filter: &str) -> Option<Node> {
    search_folded(node, &fold_label(filter), false)
}

/// Search with an inherited full-match flag
pub fn search_with(node: &Node, filter: &str, full_matched: bool) -> Option<Node> {
    search_folded(node, &fold_label(filter), full_matched)
}

pub fn search_all(nodes: &[Node], filter: &str) -> Vec<Node> {
    let folded = fold_label(filter);
    nodes
        .iter()
        .filter_map(|node| search_folded(node, &folded, false))
        .collect()
}

fn search_folded(node: &Node, filter: &str, full_matched: bool) -> Option<Node> {
    let label = fold_label(&node.label);
    let full_matched = full_matched || label == filter;

    let children: Vec<Node> = node
        .children
        .iter()
        .filter_map(|child| search_folded(child, filter, full_matched))
        .collect();

    if full_matched || !children.is_empty() || label.contains(filter) {
        Some(node.clone().with_children(children))
    } else {
        None
    }
}
