//! Assemble flat `/`-delimited store entries into a hierarchy

use super::node::Node;
use super::sentinel::{parent_path, REPOSITORY_ROOT};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Builds one subtree from a root node and a flat list of entries
///
/// An entry is attached under the folder entry whose path is its parent path;
/// top-level entries attach to the root. Entries whose parent folder is missing
/// are stale references and are dropped. Within one parent the first entry for
/// a given path wins.
pub struct TreeBuilder {
    root: Node,
    entries: Vec<Node>,
}

impl TreeBuilder {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            entries: Vec::new(),
        }
    }

    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.entries.extend(entries);
        self
    }

    pub fn build(self) -> Node {
        let total = self.entries.len();
        let mut by_parent: HashMap<String, Vec<Node>> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for entry in self.entries {
            let parent = parent_path(&entry.path).to_string();
            if !seen.insert((parent.clone(), entry.path.clone())) {
                debug!(path = %entry.path, "Skipping duplicate entry");
                continue;
            }
            by_parent.entry(parent).or_default().push(entry);
        }

        let mut attached = 0usize;
        let root_children = by_parent.remove(REPOSITORY_ROOT).unwrap_or_default();
        let children = root_children
            .into_iter()
            .map(|child| assemble(child, &mut by_parent, &mut attached))
            .collect();

        if attached < total {
            debug!(
                root = %self.root.label,
                dropped = total - attached,
                "Dropped entries with no reachable parent folder"
            );
        }

        self.root.with_children(children)
    }
}

fn assemble(node: Node, by_parent: &mut HashMap<String, Vec<Node>>, attached: &mut usize) -> Node {
    *attached += 1;
    if !node.category.is_folder() {
        return node;
    }
    let children = by_parent
        .remove(&node.path)
        .unwrap_or_default()
        .into_iter()
        .map(|child| assemble(child, by_parent, attached))
        .collect();
    node.with_children(children)
}
