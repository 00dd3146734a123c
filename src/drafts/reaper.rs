//! Draft Reaper
//!
//! Expires auto-saved drafts while the auto-save subtree is being built and
//! groups the survivors by owner, then by kind.

use super::{DraftFile, DraftKind, DraftStore};
use crate::error::StoreError;
use crate::tree::compare::by_label;
use crate::tree::sentinel::synthetic_path;
use crate::tree::{Node, NodeCategory};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default retention window for auto-saved drafts
pub const DEFAULT_RETENTION_DAYS: i64 = 7;

const ANONYMOUS_LABEL: &str = "anonymous";
const ANONYMOUS_SEGMENT: &str = "_NULL_";

/// Draft that survived reaping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveDraft {
    pub draft: DraftFile,
    pub last_modified: i64,
}

/// Strictly older than the retention window
pub fn is_expired(last_modified: i64, now: DateTime<Utc>, retention: Duration) -> bool {
    now.timestamp_millis() - last_modified > retention.num_milliseconds()
}

pub struct DraftReaper {
    store: Arc<dyn DraftStore>,
    retention: Duration,
}

impl DraftReaper {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self {
            store,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Delete expired drafts and return the rest
    ///
    /// Drafts that vanished between listing and stat are dropped silently. A
    /// failed delete is logged; the expired draft is excluded either way.
    pub fn reap(&self, drafts: Vec<DraftFile>, now: DateTime<Utc>) -> Vec<LiveDraft> {
        let mut live = Vec::with_capacity(drafts.len());
        let mut expired = 0usize;

        for draft in drafts {
            let last_modified = match self.store.last_modified(&draft) {
                Ok(ts) => ts,
                Err(StoreError::NotFound(_)) => {
                    debug!(draft = %draft, "Draft disappeared before it could be inspected");
                    continue;
                }
                Err(e) => {
                    warn!(draft = %draft, error = %e, "Failed to read draft timestamp, skipping");
                    continue;
                }
            };

            if is_expired(last_modified, now, self.retention) {
                expired += 1;
                if let Err(e) = self.store.delete(&draft) {
                    warn!(draft = %draft, error = %e, "Failed to delete expired draft");
                } else {
                    debug!(draft = %draft, last_modified, "Deleted expired draft");
                }
                continue;
            }

            live.push(LiveDraft {
                draft,
                last_modified,
            });
        }

        if expired > 0 {
            info!(
                expired,
                kept = live.len(),
                retention_days = self.retention.num_days(),
                "Reaped expired auto-save drafts"
            );
        }
        live
    }
}

/// One grouping node per owner, each with a worksheet and a viewsheet group
pub fn group_by_owner(drafts: Vec<LiveDraft>) -> Vec<Node> {
    let mut owners: BTreeMap<Option<String>, Vec<LiveDraft>> = BTreeMap::new();
    for live in drafts {
        owners.entry(live.draft.owner.clone()).or_default().push(live);
    }

    let mut groups: Vec<Node> = owners
        .into_iter()
        .map(|(owner, drafts)| owner_group(owner.as_deref(), drafts))
        .collect();
    groups.sort_by(by_label);
    groups
}

fn owner_group(owner: Option<&str>, drafts: Vec<LiveDraft>) -> Node {
    let segment = owner.unwrap_or(ANONYMOUS_SEGMENT);
    let label = owner.unwrap_or(ANONYMOUS_LABEL);

    let (worksheets, viewsheets): (Vec<LiveDraft>, Vec<LiveDraft>) = drafts
        .into_iter()
        .partition(|live| live.draft.kind == DraftKind::Worksheet);

    Node::new(
        synthetic_path(&["autosave", segment]),
        label,
        NodeCategory::AutoSaveFolder,
    )
    .with_children(vec![
        kind_group(segment, DraftKind::Worksheet, worksheets),
        kind_group(segment, DraftKind::Viewsheet, viewsheets),
    ])
}

fn kind_group(segment: &str, kind: DraftKind, drafts: Vec<LiveDraft>) -> Node {
    let (kind_segment, label) = match kind {
        DraftKind::Worksheet => ("worksheet", "Worksheets"),
        DraftKind::Viewsheet => ("viewsheet", "Viewsheets"),
    };
    let mut entries: Vec<Node> = drafts
        .into_iter()
        .map(|live| {
            Node::new(
                live.draft.file_name,
                live.draft.name,
                NodeCategory::AutoSaveEntry,
            )
            .with_last_modified(live.last_modified)
        })
        .collect();
    entries.sort_by(by_label);

    Node::new(
        synthetic_path(&["autosave", segment, kind_segment]),
        label,
        NodeCategory::AutoSaveFolder,
    )
    .with_children(entries)
}
