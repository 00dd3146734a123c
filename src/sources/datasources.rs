//! Data sources, their models and queries, and the script / table-style libraries

use super::{FetchContext, Registry, RegistryCategory, SourceAdapter, SourceKind, SourceOutput};
use crate::error::ApiError;
use crate::tree::compare::{
    by_category_rank_then_label, by_folder_then_label, by_label, sort_recursive,
};
use crate::tree::sentinel::{
    child_path, last_segment, LIBRARY_ROOT, REPOSITORY_ROOT, SCRIPT_LIBRARY, TABLE_STYLE_LIBRARY,
};
use crate::tree::{Node, NodeCategory, TreeBuilder};
use crate::types::{RequestContext, UsersToLoad};
use std::sync::Arc;
use tracing::debug;

/// Per-data-source child categories, in display order
const DATA_SOURCE_CHILDREN: [(RegistryCategory, NodeCategory, &str); 5] = [
    (
        RegistryCategory::LogicalModel,
        NodeCategory::LogicalModel,
        "listing logical models",
    ),
    (
        RegistryCategory::Partition,
        NodeCategory::Partition,
        "listing partitions",
    ),
    (RegistryCategory::Vpm, NodeCategory::Vpm, "listing VPMs"),
    (
        RegistryCategory::QueryFolder,
        NodeCategory::QueryFolder,
        "listing query folders",
    ),
    (RegistryCategory::Query, NodeCategory::Query, "listing queries"),
];

pub struct DataSourceSource {
    registry: Arc<dyn Registry>,
}

impl DataSourceSource {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    fn list(
        &self,
        category: RegistryCategory,
        scope: Option<&str>,
        context: &str,
    ) -> Result<Vec<String>, ApiError> {
        self.registry
            .list(category, scope)
            .fetching(SourceKind::DataSources, context)
    }

    fn data_source_tree(&self) -> Result<Node, ApiError> {
        let folders = self.list(
            RegistryCategory::DataSourceFolder,
            None,
            "listing data source folders",
        )?;
        let data_sources = self.list(RegistryCategory::DataSource, None, "listing data sources")?;

        let mut entries: Vec<Node> = folders
            .iter()
            .map(|path| leaf(path, NodeCategory::DataSourceFolder))
            .collect();

        for ds in &data_sources {
            entries.push(leaf(ds, NodeCategory::DataSource));
            for (registry_category, category, context) in DATA_SOURCE_CHILDREN {
                for name in self.list(registry_category, Some(ds), context)? {
                    let path = child_path(ds, &name);
                    entries.push(Node::new(path, last_segment(&name), category));
                }
            }
        }

        debug!(
            folders = folders.len(),
            data_sources = data_sources.len(),
            entries = entries.len(),
            "Loaded data source registry"
        );

        let mut root = TreeBuilder::new(
            Node::new(REPOSITORY_ROOT, "Data Sources", NodeCategory::DataSourceFolder).built_in(),
        )
        .with_entries(entries)
        .build();
        sort_recursive(&mut root.children, &by_folder_then_label);
        resort_data_source_children(&mut root.children);
        Ok(root)
    }

    fn library_tree(&self) -> Result<Node, ApiError> {
        let scripts = self.list(RegistryCategory::Script, None, "listing scripts")?;
        let styles = self.list(RegistryCategory::TableStyle, None, "listing table styles")?;

        let scripts = library(SCRIPT_LIBRARY, "Scripts", scripts, NodeCategory::Script);
        let styles = library(
            TABLE_STYLE_LIBRARY,
            "Table Styles",
            styles,
            NodeCategory::TableStyle,
        );

        Ok(Node::new(LIBRARY_ROOT, "Library", NodeCategory::LibraryFolder)
            .with_children(vec![scripts, styles]))
    }
}

impl SourceAdapter for DataSourceSource {
    fn kind(&self) -> SourceKind {
        SourceKind::DataSources
    }

    fn fetch(&self, _ctx: &RequestContext, _users: &UsersToLoad) -> Result<SourceOutput, ApiError> {
        Ok(SourceOutput::Many(vec![
            self.data_source_tree()?,
            self.library_tree()?,
        ]))
    }
}

fn leaf(path: &str, category: NodeCategory) -> Node {
    Node::new(path, last_segment(path), category)
}

fn library(path: &str, label: &str, names: Vec<String>, category: NodeCategory) -> Node {
    let mut children: Vec<Node> = names.iter().map(|name| leaf(name, category)).collect();
    children.sort_by(by_label);
    Node::new(path, label, NodeCategory::LibraryFolder)
        .built_in()
        .with_children(children)
}

/// Data sources list models and partitions ahead of queries
fn resort_data_source_children(nodes: &mut [Node]) {
    for node in nodes.iter_mut() {
        if node.category == NodeCategory::DataSource {
            node.children.sort_by(by_category_rank_then_label);
        }
        resort_data_source_children(&mut node.children);
    }
}
