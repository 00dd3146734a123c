//! Node ordering
//!
//! Ordering is decided per adapter; the merger never re-sorts across adapters.

use super::node::{Node, NodeCategory};
use crate::search::fold_label;
use std::cmp::Ordering;

/// Folders before leaves, then label (case-insensitive), then path
pub fn by_folder_then_label(a: &Node, b: &Node) -> Ordering {
    b.category
        .is_folder()
        .cmp(&a.category.is_folder())
        .then_with(|| by_label(a, b))
}

/// Label (case-insensitive), then path for a stable total order
pub fn by_label(a: &Node, b: &Node) -> Ordering {
    fold_label(&a.label)
        .cmp(&fold_label(&b.label))
        .then_with(|| a.path.cmp(&b.path))
}

/// Data-source children: models, partitions, VPMs, query folders, queries
pub fn by_category_rank_then_label(a: &Node, b: &Node) -> Ordering {
    category_rank(a.category)
        .cmp(&category_rank(b.category))
        .then_with(|| by_label(a, b))
}

/// Most recently modified first
pub fn by_last_modified_desc(a: &Node, b: &Node) -> Ordering {
    b.metadata
        .last_modified
        .cmp(&a.metadata.last_modified)
        .then_with(|| by_label(a, b))
}

fn category_rank(category: NodeCategory) -> u8 {
    match category {
        NodeCategory::DataSourceFolder => 0,
        NodeCategory::DataSource => 1,
        NodeCategory::LogicalModel => 2,
        NodeCategory::Partition => 3,
        NodeCategory::Vpm => 4,
        NodeCategory::QueryFolder => 5,
        NodeCategory::Query => 6,
        _ => 7,
    }
}

/// Sort a node list and every descendant list with the same comparator
pub fn sort_recursive<F>(nodes: &mut [Node], cmp: &F)
where
    F: Fn(&Node, &Node) -> Ordering,
{
    nodes.sort_by(cmp);
    for node in nodes.iter_mut() {
        sort_recursive(&mut node.children, cmp);
    }
}
