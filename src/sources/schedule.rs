//! Schedule tasks and task folders

use super::{FetchContext, Registry, RegistryCategory, SourceAdapter, SourceKind, SourceOutput};
use crate::error::ApiError;
use crate::tree::compare::{by_folder_then_label, sort_recursive};
use crate::tree::sentinel::{last_segment, REPOSITORY_ROOT};
use crate::tree::{Node, NodeCategory, TreeBuilder};
use crate::types::{RequestContext, UsersToLoad};
use std::sync::Arc;

/// System tasks are registered with a double-underscore prefix
const BUILT_IN_PREFIX: &str = "__";

pub struct ScheduleSource {
    registry: Arc<dyn Registry>,
}

impl ScheduleSource {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }
}

impl SourceAdapter for ScheduleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::ScheduleTasks
    }

    fn fetch(&self, _ctx: &RequestContext, _users: &UsersToLoad) -> Result<SourceOutput, ApiError> {
        let folders = self
            .registry
            .list(RegistryCategory::ScheduleTaskFolder, None)
            .fetching(self.kind(), "listing schedule task folders")?;
        let tasks = self
            .registry
            .list(RegistryCategory::ScheduleTask, None)
            .fetching(self.kind(), "listing schedule tasks")?;

        let folders = folders.into_iter().map(|path| {
            let label = last_segment(&path).to_string();
            Node::new(path, label, NodeCategory::ScheduleTaskFolder)
        });
        let tasks = tasks.into_iter().map(|path| {
            let label = last_segment(&path).to_string();
            let node = Node::new(path, label.as_str(), NodeCategory::ScheduleTask);
            if label.starts_with(BUILT_IN_PREFIX) {
                node.built_in()
            } else {
                node
            }
        });

        let mut root = TreeBuilder::new(
            Node::new(REPOSITORY_ROOT, "Schedule Tasks", NodeCategory::ScheduleTaskFolder)
                .built_in(),
        )
        .with_entries(folders.chain(tasks))
        .build();
        sort_recursive(&mut root.children, &by_folder_then_label);

        Ok(SourceOutput::Single(root))
    }
}
