//! Special folders: every user's private report area and the repository trash

use super::assets::build_sorted;
use super::{AssetEntry, AssetStore, FetchContext, SourceAdapter, SourceKind, SourceOutput};
use crate::error::ApiError;
use crate::security::IdentityDirectory;
use crate::tree::compare::by_label;
use crate::tree::sentinel::{private_path, TRASH_ROOT, USERS_ROOT};
use crate::tree::{Node, NodeCategory};
use crate::types::{Identity, RequestContext, UsersToLoad};
use std::sync::Arc;
use tracing::debug;

pub struct SpecialFolderSource {
    store: Arc<dyn AssetStore>,
    directory: Arc<dyn IdentityDirectory>,
}

impl SpecialFolderSource {
    pub fn new(store: Arc<dyn AssetStore>, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { store, directory }
    }

    /// Private area root: named after the user, children live under its path
    fn user_folder(&self, user: &Identity, users: &UsersToLoad) -> Result<Node, ApiError> {
        let folder = Node::new(user.name(), user.name(), NodeCategory::UserRoot).owned_by(user.name());
        if !users.includes(user.name()) {
            return Ok(folder.unloaded());
        }

        let entries: Vec<AssetEntry> = self
            .store
            .entries(Some(user.name()))
            .fetching(self.kind(), "listing private user entries")?
            .into_iter()
            .map(|entry| match entry.owner {
                Some(_) => entry,
                None => entry.owned_by(user.name()),
            })
            .collect();
        let mut folder = build_sorted(folder, entries);
        folder.children = folder
            .children
            .into_iter()
            .map(|child| into_private_area(child, user.name()))
            .collect();
        Ok(folder)
    }
}

fn into_private_area(mut node: Node, owner: &str) -> Node {
    node.path = private_path(owner, &node.path);
    node.children = node
        .children
        .into_iter()
        .map(|child| into_private_area(child, owner))
        .collect();
    node
}

impl SourceAdapter for SpecialFolderSource {
    fn kind(&self) -> SourceKind {
        SourceKind::SpecialFolders
    }

    fn fetch(&self, ctx: &RequestContext, users: &UsersToLoad) -> Result<SourceOutput, ApiError> {
        let identities = self
            .directory
            .users()
            .fetching(self.kind(), "listing users")?;

        let mut folders = identities
            .iter()
            .map(|user| self.user_folder(user, users))
            .collect::<Result<Vec<_>, _>>()?;
        folders.sort_by(by_label);

        debug!(
            viewer = %ctx.viewer(),
            users = folders.len(),
            "Built private user folders"
        );

        let users_root =
            Node::new(USERS_ROOT, USERS_ROOT, NodeCategory::UserRoot).with_children(folders);

        let trash_entries = self
            .store
            .trash()
            .fetching(self.kind(), "listing trash entries")?;
        let trash = build_sorted(
            Node::new(TRASH_ROOT, TRASH_ROOT, NodeCategory::Trash).built_in(),
            trash_entries,
        );

        Ok(SourceOutput::Many(vec![users_root, trash]))
    }
}
