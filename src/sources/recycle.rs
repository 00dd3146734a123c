//! Recycle bin and auto-saved drafts
//!
//! Entries here are never permission-checked one by one. Visibility is
//! decided by the viewer's relationship to each entry: system administrators
//! see everything, other users see only what they own or deleted. Expired
//! drafts are reaped for every owner while this subtree is built.

use super::{AssetStore, FetchContext, RecycleRecord, SourceAdapter, SourceKind, SourceOutput};
use crate::drafts::reaper::group_by_owner;
use crate::drafts::{Clock, DraftReaper, DraftStore};
use crate::error::{ApiError, StoreError};
use crate::security::IdentityDirectory;
use crate::tree::compare::by_last_modified_desc;
use crate::tree::sentinel::{last_segment, AUTO_SAVE_ROOT, RECYCLE_BIN_ROOT};
use crate::tree::{Node, NodeCategory};
use crate::types::{Identity, RequestContext, UsersToLoad};
use std::sync::Arc;
use tracing::debug;

pub struct RecycleSource {
    store: Arc<dyn AssetStore>,
    drafts: Arc<dyn DraftStore>,
    directory: Arc<dyn IdentityDirectory>,
    reaper: DraftReaper,
    clock: Arc<dyn Clock>,
}

impl RecycleSource {
    pub fn new(
        store: Arc<dyn AssetStore>,
        drafts: Arc<dyn DraftStore>,
        directory: Arc<dyn IdentityDirectory>,
        reaper: DraftReaper,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            drafts,
            directory,
            reaper,
            clock,
        }
    }

    fn recycle_bin(&self, viewer: &Identity, admin: bool) -> Result<Node, ApiError> {
        let records = self
            .store
            .recycle_records()
            .fetching(self.kind(), "listing recycle bin records")?;

        let mut entries = Vec::new();
        for record in records {
            if !admin && !record_visible_to(&record, viewer) {
                continue;
            }
            match self.store.exists(&record.path) {
                Ok(true) => entries.push(recycle_entry(record)),
                Ok(false) | Err(StoreError::NotFound(_)) => {
                    debug!(path = %record.path, "Dropping stale recycle bin record");
                }
                Err(error) => {
                    return Err(ApiError::Source {
                        source_kind: self.kind(),
                        context: "resolving recycle bin content".to_string(),
                        error,
                    });
                }
            }
        }
        entries.sort_by(by_last_modified_desc);

        Ok(
            Node::new(RECYCLE_BIN_ROOT, RECYCLE_BIN_ROOT, NodeCategory::RecycleBinFolder)
                .built_in()
                .with_children(entries),
        )
    }

    fn auto_saved(&self, viewer: &Identity, admin: bool) -> Result<Node, ApiError> {
        let listed = self
            .drafts
            .list()
            .fetching(self.kind(), "listing auto-save drafts")?;
        let live = self.reaper.reap(listed, self.clock.now());
        let visible = live
            .into_iter()
            .filter(|live| admin || live.draft.owned_by(viewer.name()))
            .collect();

        Ok(
            Node::new(AUTO_SAVE_ROOT, AUTO_SAVE_ROOT, NodeCategory::AutoSaveFolder)
                .built_in()
                .with_children(group_by_owner(visible)),
        )
    }
}

impl SourceAdapter for RecycleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::RecycleBin
    }

    fn fetch(&self, ctx: &RequestContext, _users: &UsersToLoad) -> Result<SourceOutput, ApiError> {
        let viewer = ctx.viewer();
        let admin = self
            .directory
            .is_system_admin(viewer)
            .fetching(self.kind(), "resolving administrator status")?;

        let recycle_bin = self.recycle_bin(viewer, admin)?;
        let auto_saved = self.auto_saved(viewer, admin)?;
        Ok(SourceOutput::Many(vec![recycle_bin, auto_saved]))
    }
}

fn record_visible_to(record: &RecycleRecord, viewer: &Identity) -> bool {
    record.owner.as_deref() == Some(viewer.name())
        || record.deleted_by.as_deref() == Some(viewer.name())
}

fn recycle_entry(record: RecycleRecord) -> Node {
    let label = record
        .label
        .unwrap_or_else(|| last_segment(&record.original_path).to_string());
    Node::new(record.path, label, NodeCategory::RecycleBinEntry)
        .with_description(format!(
            "{} ({})",
            record.original_path, record.original_category
        ))
        .with_last_modified(record.deleted_at)
}
