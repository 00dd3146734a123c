//! Content tree node types

use super::sentinel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad resource family a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Repository,
    Viewsheet,
    Worksheet,
    DataSource,
    Query,
    DataModel,
    Library,
    Schedule,
    Dashboard,
    Recycle,
    AutoSave,
    User,
    Trash,
}

/// Node category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeCategory {
    RepositoryFolder,
    Viewsheet,
    ViewsheetSnapshot,
    Worksheet,
    WorksheetFolder,
    DataSource,
    DataSourceFolder,
    Query,
    QueryFolder,
    LogicalModel,
    Partition,
    Vpm,
    Script,
    TableStyle,
    LibraryFolder,
    ScheduleTask,
    ScheduleTaskFolder,
    Dashboard,
    DashboardFolder,
    RecycleBinFolder,
    RecycleBinEntry,
    AutoSaveFolder,
    AutoSaveEntry,
    UserRoot,
    Trash,
}

impl NodeCategory {
    pub fn is_folder(self) -> bool {
        match self {
            NodeCategory::RepositoryFolder
            | NodeCategory::WorksheetFolder
            | NodeCategory::DataSource
            | NodeCategory::DataSourceFolder
            | NodeCategory::QueryFolder
            | NodeCategory::LibraryFolder
            | NodeCategory::ScheduleTaskFolder
            | NodeCategory::DashboardFolder
            | NodeCategory::RecycleBinFolder
            | NodeCategory::AutoSaveFolder
            | NodeCategory::UserRoot
            | NodeCategory::Trash => true,
            NodeCategory::Viewsheet
            | NodeCategory::ViewsheetSnapshot
            | NodeCategory::Worksheet
            | NodeCategory::Query
            | NodeCategory::LogicalModel
            | NodeCategory::Partition
            | NodeCategory::Vpm
            | NodeCategory::Script
            | NodeCategory::TableStyle
            | NodeCategory::ScheduleTask
            | NodeCategory::Dashboard
            | NodeCategory::RecycleBinEntry
            | NodeCategory::AutoSaveEntry => false,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            NodeCategory::RepositoryFolder => NodeKind::Repository,
            NodeCategory::Viewsheet | NodeCategory::ViewsheetSnapshot => NodeKind::Viewsheet,
            NodeCategory::Worksheet | NodeCategory::WorksheetFolder => NodeKind::Worksheet,
            NodeCategory::DataSource | NodeCategory::DataSourceFolder => NodeKind::DataSource,
            NodeCategory::Query | NodeCategory::QueryFolder => NodeKind::Query,
            NodeCategory::LogicalModel | NodeCategory::Partition | NodeCategory::Vpm => {
                NodeKind::DataModel
            }
            NodeCategory::Script | NodeCategory::TableStyle | NodeCategory::LibraryFolder => {
                NodeKind::Library
            }
            NodeCategory::ScheduleTask | NodeCategory::ScheduleTaskFolder => NodeKind::Schedule,
            NodeCategory::Dashboard | NodeCategory::DashboardFolder => NodeKind::Dashboard,
            NodeCategory::RecycleBinFolder | NodeCategory::RecycleBinEntry => NodeKind::Recycle,
            NodeCategory::AutoSaveFolder | NodeCategory::AutoSaveEntry => NodeKind::AutoSave,
            NodeCategory::UserRoot => NodeKind::User,
            NodeCategory::Trash => NodeKind::Trash,
        }
    }

    /// Recycle-bin and auto-save categories are control-only and never permission-checked
    pub fn is_recycle_grouping(self) -> bool {
        matches!(
            self,
            NodeCategory::RecycleBinFolder
                | NodeCategory::RecycleBinEntry
                | NodeCategory::AutoSaveFolder
                | NodeCategory::AutoSaveEntry
        )
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeCategory::RepositoryFolder => "repository-folder",
            NodeCategory::Viewsheet => "viewsheet",
            NodeCategory::ViewsheetSnapshot => "viewsheet-snapshot",
            NodeCategory::Worksheet => "worksheet",
            NodeCategory::WorksheetFolder => "worksheet-folder",
            NodeCategory::DataSource => "data-source",
            NodeCategory::DataSourceFolder => "data-source-folder",
            NodeCategory::Query => "query",
            NodeCategory::QueryFolder => "query-folder",
            NodeCategory::LogicalModel => "logical-model",
            NodeCategory::Partition => "partition",
            NodeCategory::Vpm => "vpm",
            NodeCategory::Script => "script",
            NodeCategory::TableStyle => "table-style",
            NodeCategory::LibraryFolder => "library-folder",
            NodeCategory::ScheduleTask => "schedule-task",
            NodeCategory::ScheduleTaskFolder => "schedule-task-folder",
            NodeCategory::Dashboard => "dashboard",
            NodeCategory::DashboardFolder => "dashboard-folder",
            NodeCategory::RecycleBinFolder => "recycle-bin-folder",
            NodeCategory::RecycleBinEntry => "recycle-bin-entry",
            NodeCategory::AutoSaveFolder => "auto-save-folder",
            NodeCategory::AutoSaveEntry => "auto-save-entry",
            NodeCategory::UserRoot => "user-root",
            NodeCategory::Trash => "trash",
        };
        f.write_str(name)
    }
}

/// Descriptive node metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Epoch milliseconds; 0 when unknown
    #[serde(default)]
    pub last_modified: i64,
}

/// Node flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFlags {
    /// `None` until the redactor evaluates the node (or for control-only nodes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default)]
    pub built_in: bool,
    /// Children exist in the store but were not fetched for this request
    #[serde(default)]
    pub unloaded: bool,
}

/// One entry in the aggregated content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub path: String,
    pub label: String,
    pub category: NodeCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default)]
    pub metadata: NodeMetadata,
    #[serde(default)]
    pub flags: NodeFlags,
}

impl Node {
    pub fn new(path: impl Into<String>, label: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            category,
            owner: None,
            children: Vec::new(),
            metadata: NodeMetadata::default(),
            flags: NodeFlags::default(),
        }
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_read_only(mut self, read_only: Option<bool>) -> Self {
        self.flags.read_only = read_only;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata.description = Some(description.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: i64) -> Self {
        self.metadata.last_modified = last_modified;
        self
    }

    pub fn built_in(mut self) -> Self {
        self.flags.built_in = true;
        self
    }

    pub fn unloaded(mut self) -> Self {
        self.flags.unloaded = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.read_only == Some(true)
    }

    /// Grouping node with no backing resource
    pub fn is_placeholder(&self) -> bool {
        self.path.is_empty() || sentinel::is_synthetic(&self.path)
    }

    /// Node plus all descendants
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Depth-first search for a node by category and path
    pub fn find(&self, category: NodeCategory, path: &str) -> Option<&Node> {
        if self.category == category && self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(category, path))
    }

    pub fn child(&self, path: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.path == path)
    }
}
