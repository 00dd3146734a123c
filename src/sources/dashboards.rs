//! Global and per-user dashboards

use super::{FetchContext, Registry, RegistryCategory, SourceAdapter, SourceKind, SourceOutput};
use crate::error::ApiError;
use crate::tree::compare::by_label;
use crate::tree::sentinel::{last_segment, private_path, DASHBOARDS_ROOT, USERS_DASHBOARDS_ROOT};
use crate::tree::{Node, NodeCategory};
use crate::types::{RequestContext, UsersToLoad};
use std::sync::Arc;

pub struct DashboardSource {
    registry: Arc<dyn Registry>,
}

impl DashboardSource {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    fn dashboards(&self, owner: Option<&str>) -> Result<Vec<Node>, ApiError> {
        let mut nodes: Vec<Node> = self
            .registry
            .list(RegistryCategory::Dashboard, owner)
            .fetching(SourceKind::Dashboards, "listing dashboards")?
            .into_iter()
            .map(|name| {
                let path = match owner {
                    Some(owner) => private_path(owner, &name),
                    None => name.clone(),
                };
                Node::new(path, last_segment(&name), NodeCategory::Dashboard)
                    .with_owner(owner.map(str::to_string))
            })
            .collect();
        nodes.sort_by(by_label);
        Ok(nodes)
    }
}

impl SourceAdapter for DashboardSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Dashboards
    }

    fn fetch(&self, _ctx: &RequestContext, _users: &UsersToLoad) -> Result<SourceOutput, ApiError> {
        let global = Node::new(DASHBOARDS_ROOT, DASHBOARDS_ROOT, NodeCategory::DashboardFolder)
            .with_children(self.dashboards(None)?);

        let owners = self
            .registry
            .dashboard_owners()
            .fetching(self.kind(), "listing dashboard owners")?;
        let mut user_folders = Vec::with_capacity(owners.len());
        for owner in owners {
            let dashboards = self.dashboards(Some(&owner))?;
            user_folders.push(
                Node::new(owner.as_str(), owner.as_str(), NodeCategory::DashboardFolder)
                    .owned_by(owner.as_str())
                    .with_children(dashboards),
            );
        }
        user_folders.sort_by(by_label);

        let users = Node::new(
            USERS_DASHBOARDS_ROOT,
            USERS_DASHBOARDS_ROOT,
            NodeCategory::DashboardFolder,
        )
        .with_children(user_folders);

        Ok(SourceOutput::Many(vec![global, users]))
    }
}
