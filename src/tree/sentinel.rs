//! Sentinel paths and path helpers
//!
//! Root folders of hierarchical stores use `/`; below the root, paths are
//! `/`-delimited without a leading slash (`Sales`, `Sales/Q1`). Synthetic
//! grouping paths start with `#` and never map to a stored resource. Private
//! content lives under its owner's area (`alice`, `alice/Plans`).

use super::node::{Node, NodeCategory};

pub const REPOSITORY_ROOT: &str = "/";
pub const USERS_ROOT: &str = "Users' Reports";
pub const DASHBOARDS_ROOT: &str = "Dashboards";
pub const USERS_DASHBOARDS_ROOT: &str = "Users' Dashboards";
pub const TRASH_ROOT: &str = "Trash";
pub const RECYCLE_BIN_ROOT: &str = "Recycle Bin";
pub const AUTO_SAVE_ROOT: &str = "Auto Saved Files";
pub const LIBRARY_ROOT: &str = "";
pub const SCRIPT_LIBRARY: &str = "*scripts";
pub const TABLE_STYLE_LIBRARY: &str = "*table styles";

const SYNTHETIC_PREFIX: char = '#';

/// Build a synthetic grouping path from segments
pub fn synthetic_path(segments: &[&str]) -> String {
    format!("{}{}", SYNTHETIC_PREFIX, segments.join("/"))
}

pub fn is_synthetic(path: &str) -> bool {
    path.starts_with(SYNTHETIC_PREFIX)
}

/// Grouping roots exempt from permission pruning
pub fn is_virtual_root(node: &Node) -> bool {
    match node.category {
        NodeCategory::UserRoot => node.path == USERS_ROOT,
        NodeCategory::DashboardFolder => {
            node.path == DASHBOARDS_ROOT || node.path == USERS_DASHBOARDS_ROOT
        }
        _ => false,
    }
}

/// Parent of a `/`-delimited path; top-level entries have the root as parent
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx > 0 => &path[..idx],
        _ => REPOSITORY_ROOT,
    }
}

/// Last segment of a `/`-delimited path
pub fn last_segment(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a child segment onto a parent path
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() || parent == REPOSITORY_ROOT {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Path of a private entry inside `owner`'s area
pub fn private_path(owner: &str, path: &str) -> String {
    child_path(owner, path)
}

/// True for `owner`'s area root and everything beneath it
pub fn in_private_area(owner: &str, path: &str) -> bool {
    match path.strip_prefix(owner) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
