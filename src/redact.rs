//! Permission Redactor
//!
//! Rewrites a merged tree for one viewer. Children are redacted first; a node
//! that fails its permission check survives only as a read-only ancestor of
//! something visible, unless it is a virtual root. Owner scoping is a hard
//! boundary checked before content permission; nodes inside it still go
//! through the content check like any other.

use crate::security::{Authorizer, PermissionOracle, ResourceAction, ResourceType};
use crate::tree::sentinel::is_virtual_root;
use crate::tree::{resource_for, Node, NodeCategory, NodeFlags};
use crate::types::{Identity, RequestContext};
use std::sync::Arc;
use tracing::trace;

#[derive(Clone)]
pub struct Redactor {
    authorizer: Authorizer,
}

impl Redactor {
    pub fn new(oracle: Arc<dyn PermissionOracle>) -> Self {
        Self {
            authorizer: Authorizer::new(oracle),
        }
    }

    /// Redact every top-level node, keeping order
    pub fn redact_all(&self, nodes: &[Node], ctx: &RequestContext) -> Vec<Node> {
        nodes
            .iter()
            .filter_map(|node| self.redact(node, ctx))
            .collect()
    }

    /// Viewer's copy of `node`, or `None` when nothing in it is visible
    pub fn redact(&self, node: &Node, ctx: &RequestContext) -> Option<Node> {
        let viewer = ctx.viewer();
        let virtual_root = is_virtual_root(node);

        // Owner mismatch drops the node regardless of its children, so the
        // subtree is not walked at all.
        if self.owner_mismatch(node, viewer, virtual_root) {
            trace!(path = %node.path, owner = ?node.owner, "Dropping node outside viewer's scope");
            return None;
        }

        let children: Vec<Node> = node
            .children
            .iter()
            .filter_map(|child| self.redact(child, ctx))
            .collect();

        if node.category.is_recycle_grouping() {
            return Some(rebuild(node, children, None));
        }

        if node.is_placeholder() {
            if children.is_empty() {
                return None;
            }
            return Some(rebuild(node, children, None));
        }

        let read_only = self.read_only(node, viewer, &children);
        if read_only && !virtual_root && children.is_empty() {
            trace!(path = %node.path, category = %node.category, "Dropping read-only leaf");
            return None;
        }
        Some(rebuild(node, children, Some(read_only)))
    }

    fn owner_mismatch(&self, node: &Node, viewer: &Identity, virtual_root: bool) -> bool {
        match node.owner.as_deref() {
            Some(owner) if !virtual_root => {
                owner != viewer.name() && !self.authorizer.is_admin_of(viewer, owner)
            }
            _ => false,
        }
    }

    fn read_only(&self, node: &Node, viewer: &Identity, children: &[Node]) -> bool {
        match node.category {
            NodeCategory::Trash => children.is_empty(),
            NodeCategory::ScheduleTask => !self.authorizer.allowed(
                viewer,
                ResourceType::ScheduleTask,
                &node.path,
                ResourceAction::Read,
            ),
            category => match resource_for(category, &node.path) {
                Some(resource) => {
                    !self
                        .authorizer
                        .allowed_on(viewer, &resource, ResourceAction::Admin)
                }
                None => true,
            },
        }
    }
}

fn rebuild(node: &Node, children: Vec<Node>, read_only: Option<bool>) -> Node {
    Node {
        path: node.path.clone(),
        label: node.label.clone(),
        category: node.category,
        owner: node.owner.clone(),
        children,
        metadata: node.metadata.clone(),
        flags: NodeFlags {
            read_only,
            ..node.flags.clone()
        },
    }
}
