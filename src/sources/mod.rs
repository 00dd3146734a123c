//! Source adapters
//!
//! Six independent providers, each turning one collaborating store into a
//! list of top-level nodes. Adapters share no mutable state and receive the
//! caller's context by reference to their own task-local copy.

pub mod assets;
pub mod dashboards;
pub mod datasources;
pub mod recycle;
pub mod schedule;
pub mod special;

use crate::error::{ApiError, StoreError};
use crate::tree::{Node, NodeCategory};
use crate::types::{RequestContext, UsersToLoad};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use assets::AssetSource;
pub use dashboards::DashboardSource;
pub use datasources::DataSourceSource;
pub use recycle::RecycleSource;
pub use schedule::ScheduleSource;
pub use special::SpecialFolderSource;

/// Identifies an adapter in logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Assets,
    DataSources,
    SpecialFolders,
    Dashboards,
    ScheduleTasks,
    RecycleBin,
}

impl SourceKind {
    pub const ALL: [SourceKind; 6] = [
        SourceKind::Assets,
        SourceKind::DataSources,
        SourceKind::SpecialFolders,
        SourceKind::Dashboards,
        SourceKind::ScheduleTasks,
        SourceKind::RecycleBin,
    ];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Assets => "assets",
            SourceKind::DataSources => "data sources",
            SourceKind::SpecialFolders => "special folders",
            SourceKind::Dashboards => "dashboards",
            SourceKind::ScheduleTasks => "schedule tasks",
            SourceKind::RecycleBin => "recycle bin",
        };
        f.write_str(name)
    }
}

/// Adapter result: one root or a list of roots
#[derive(Debug, Clone)]
pub enum SourceOutput {
    Single(Node),
    Many(Vec<Node>),
}

impl SourceOutput {
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            SourceOutput::Single(node) => vec![node],
            SourceOutput::Many(nodes) => nodes,
        }
    }
}

/// One independently-owned slice of the content tree
pub trait SourceAdapter: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Build this adapter's subtree; may block on collaborator calls
    fn fetch(&self, ctx: &RequestContext, users: &UsersToLoad) -> Result<SourceOutput, ApiError>;
}

/// Attach adapter context to collaborator failures
pub(crate) trait FetchContext<T> {
    fn fetching(self, source_kind: SourceKind, context: &str) -> Result<T, ApiError>;
}

impl<T> FetchContext<T> for Result<T, StoreError> {
    fn fetching(self, source_kind: SourceKind, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::Source {
            source_kind,
            context: context.to_string(),
            error,
        })
    }
}

/// Raw entry from the asset store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    pub path: String,
    pub category: NodeCategory,
    /// Display alias; the last path segment when absent
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub built_in: bool,
}

impl AssetEntry {
    pub fn new(path: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            path: path.into(),
            category,
            label: None,
            owner: None,
            description: None,
            last_modified: 0,
            built_in: false,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn into_node(self) -> Node {
        let label = self
            .label
            .unwrap_or_else(|| crate::tree::sentinel::last_segment(&self.path).to_string());
        let mut node = Node::new(self.path, label, self.category)
            .with_owner(self.owner)
            .with_last_modified(self.last_modified);
        node.metadata.description = self.description;
        node.flags.built_in = self.built_in;
        node
    }
}

/// Recycle-bin bookkeeping record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleRecord {
    /// Storage path of the parked content
    pub path: String,
    pub original_path: String,
    pub original_category: NodeCategory,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub deleted_by: Option<String>,
    #[serde(default)]
    pub deleted_at: i64,
}

/// Asset storage collaborator
pub trait AssetStore: Send + Sync {
    /// Repository and worksheet entries; `Some(user)` lists that user's private area
    fn entries(&self, owner: Option<&str>) -> Result<Vec<AssetEntry>, StoreError>;

    /// Entries parked in the repository trash
    fn trash(&self) -> Result<Vec<AssetEntry>, StoreError>;

    fn recycle_records(&self) -> Result<Vec<RecycleRecord>, StoreError>;

    fn exists(&self, path: &str) -> Result<bool, StoreError>;
}

/// Flat name lists kept by the data source, library and schedule registries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryCategory {
    DataSourceFolder,
    DataSource,
    QueryFolder,
    Query,
    LogicalModel,
    Partition,
    Vpm,
    Script,
    TableStyle,
    ScheduleTaskFolder,
    ScheduleTask,
    Dashboard,
}

/// Registry collaborator
pub trait Registry: Send + Sync {
    /// `/`-delimited names for one category; `scope` narrows to a data source
    /// (for its models, queries and VPMs) or a dashboard owner
    fn list(&self, category: RegistryCategory, scope: Option<&str>)
        -> Result<Vec<String>, StoreError>;

    /// Owners with private dashboards
    fn dashboard_owners(&self) -> Result<Vec<String>, StoreError>;
}
