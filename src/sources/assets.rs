//! Repository reports and worksheets

use super::{AssetEntry, AssetStore, FetchContext, SourceAdapter, SourceKind, SourceOutput};
use crate::error::ApiError;
use crate::tree::compare::{by_folder_then_label, sort_recursive};
use crate::tree::sentinel::REPOSITORY_ROOT;
use crate::tree::{Node, NodeCategory, TreeBuilder};
use crate::types::{RequestContext, UsersToLoad};
use std::sync::Arc;
use tracing::debug;

pub struct AssetSource {
    store: Arc<dyn AssetStore>,
}

impl AssetSource {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }
}

impl SourceAdapter for AssetSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Assets
    }

    fn fetch(&self, ctx: &RequestContext, _users: &UsersToLoad) -> Result<SourceOutput, ApiError> {
        let entries = self
            .store
            .entries(None)
            .fetching(self.kind(), "listing repository entries")?;

        let mut reports = Vec::new();
        let mut worksheets = Vec::new();
        for entry in entries {
            match entry.category {
                NodeCategory::Worksheet | NodeCategory::WorksheetFolder => worksheets.push(entry),
                NodeCategory::RepositoryFolder
                | NodeCategory::Viewsheet
                | NodeCategory::ViewsheetSnapshot => reports.push(entry),
                other => {
                    debug!(path = %entry.path, category = %other, "Ignoring non-repository entry");
                }
            }
        }

        debug!(
            viewer = %ctx.viewer(),
            reports = reports.len(),
            worksheets = worksheets.len(),
            "Loaded repository entries"
        );

        let repository = build_sorted(
            Node::new(REPOSITORY_ROOT, "Repository", NodeCategory::RepositoryFolder).built_in(),
            reports,
        );
        let worksheets = build_sorted(
            Node::new(REPOSITORY_ROOT, "Worksheets", NodeCategory::WorksheetFolder).built_in(),
            worksheets,
        );

        Ok(SourceOutput::Many(vec![repository, worksheets]))
    }
}

/// Build a subtree from raw asset entries and order it folders-first
pub(crate) fn build_sorted(root: Node, entries: Vec<AssetEntry>) -> Node {
    let mut root = TreeBuilder::new(root)
        .with_entries(entries.into_iter().map(AssetEntry::into_node))
        .build();
    sort_recursive(&mut root.children, &by_folder_then_label);
    root
}
