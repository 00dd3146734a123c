//! Mapping from tree nodes to permission resources
//!
//! This is the only bridge between the content tree and the security
//! provider: category and path jointly determine the resource checked.

use super::node::NodeCategory;
use super::sentinel;
use crate::security::ResourceType;

/// Resource checked against the permission oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResource {
    pub resource_type: ResourceType,
    pub path: String,
}

impl PermissionResource {
    fn new(resource_type: ResourceType, path: &str) -> Self {
        Self {
            resource_type,
            path: path.to_string(),
        }
    }
}

/// Resource for a node, or `None` for categories that are never checked
pub fn resource_for(category: NodeCategory, path: &str) -> Option<PermissionResource> {
    let resource = match category {
        NodeCategory::RepositoryFolder
        | NodeCategory::Viewsheet
        | NodeCategory::ViewsheetSnapshot
        | NodeCategory::Trash => PermissionResource::new(ResourceType::Report, path),
        NodeCategory::Worksheet | NodeCategory::WorksheetFolder => {
            PermissionResource::new(ResourceType::Asset, path)
        }
        NodeCategory::DataSource => PermissionResource::new(ResourceType::DataSource, path),
        NodeCategory::DataSourceFolder => {
            PermissionResource::new(ResourceType::DataSourceFolder, path)
        }
        NodeCategory::Query => PermissionResource::new(ResourceType::Query, path),
        NodeCategory::QueryFolder => PermissionResource::new(ResourceType::QueryFolder, path),
        NodeCategory::LogicalModel | NodeCategory::Partition => {
            PermissionResource::new(ResourceType::DataModel, path)
        }
        NodeCategory::Vpm => PermissionResource::new(ResourceType::Vpm, path),
        NodeCategory::Script => PermissionResource::new(ResourceType::Script, path),
        NodeCategory::TableStyle => PermissionResource::new(ResourceType::TableStyle, path),
        NodeCategory::LibraryFolder => match path {
            sentinel::SCRIPT_LIBRARY => PermissionResource::new(ResourceType::ScriptLibrary, "*"),
            sentinel::TABLE_STYLE_LIBRARY => {
                PermissionResource::new(ResourceType::TableStyleLibrary, "*")
            }
            _ => return None,
        },
        NodeCategory::ScheduleTask => PermissionResource::new(ResourceType::ScheduleTask, path),
        NodeCategory::ScheduleTaskFolder => {
            PermissionResource::new(ResourceType::ScheduleTaskFolder, path)
        }
        NodeCategory::Dashboard | NodeCategory::DashboardFolder => {
            PermissionResource::new(ResourceType::Dashboard, path)
        }
        // A user's own folder is the root of their private report area.
        NodeCategory::UserRoot if path != sentinel::USERS_ROOT => {
            PermissionResource::new(ResourceType::Report, path)
        }
        NodeCategory::UserRoot
        | NodeCategory::RecycleBinFolder
        | NodeCategory::RecycleBinEntry
        | NodeCategory::AutoSaveFolder
        | NodeCategory::AutoSaveEntry => return None,
    };
    Some(resource)
}
