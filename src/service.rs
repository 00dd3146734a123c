//! Query surface: aggregated, redacted and optionally searched content trees.

use crate::config::ContentTreeConfig;
use crate::drafts::{Clock, DraftReaper, SystemClock};
use crate::error::ApiError;
use crate::gather::{merge, Gatherer};
use crate::redact::Redactor;
use crate::search::search_all;
use crate::sources::{
    AssetSource, DashboardSource, DataSourceSource, RecycleSource, ScheduleSource, SourceAdapter,
    SpecialFolderSource,
};
use crate::store::Collaborators;
use crate::tree::Node;
use crate::types::{RequestContext, UsersToLoad};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, Instrument};

pub struct ContentTreeService {
    gatherer: Gatherer,
    redactor: Redactor,
}

impl ContentTreeService {
    pub fn new(
        collaborators: Collaborators,
        config: &ContentTreeConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let reaper = DraftReaper::new(Arc::clone(&collaborators.drafts))
            .with_retention(config.drafts.retention());

        // Merge order follows this list.
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(AssetSource::new(Arc::clone(&collaborators.assets))),
            Arc::new(DataSourceSource::new(Arc::clone(&collaborators.registry))),
            Arc::new(SpecialFolderSource::new(
                Arc::clone(&collaborators.assets),
                Arc::clone(&collaborators.directory),
            )),
            Arc::new(DashboardSource::new(Arc::clone(&collaborators.registry))),
            Arc::new(ScheduleSource::new(Arc::clone(&collaborators.registry))),
            Arc::new(RecycleSource::new(
                Arc::clone(&collaborators.assets),
                Arc::clone(&collaborators.drafts),
                Arc::clone(&collaborators.directory),
                reaper,
                clock,
            )),
        ];

        Self {
            gatherer: Gatherer::new(adapters, config.gather.clone()),
            redactor: Redactor::new(collaborators.oracle),
        }
    }

    pub fn with_system_clock(collaborators: Collaborators, config: &ContentTreeConfig) -> Self {
        Self::new(collaborators, config, Arc::new(SystemClock))
    }

    /// Full content tree as `ctx`'s viewer may see it
    ///
    /// Private areas of users outside `users` are listed but not loaded.
    /// Fails as a whole if any source fails.
    pub async fn get_tree(
        &self,
        ctx: &RequestContext,
        users: &UsersToLoad,
    ) -> Result<Vec<Node>, ApiError> {
        let span = tracing::info_span!("get_tree", viewer = %ctx.viewer());
        async {
            let started = Instant::now();
            let merged = merge(self.gatherer.gather(ctx, users).await?);
            let gathered = count_nodes(&merged);
            let tree = self.redactor.redact_all(&merged, ctx);
            info!(
                gathered,
                visible = count_nodes(&tree),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Content tree built"
            );
            Ok(tree)
        }
        .instrument(span)
        .await
    }

    /// Visible nodes whose labels match `filter`, with their ancestors
    pub async fn search_tree(
        &self,
        ctx: &RequestContext,
        filter: &str,
    ) -> Result<Vec<Node>, ApiError> {
        let tree = self.get_tree(ctx, &UsersToLoad::All).await?;
        let found = search_all(&tree, filter);
        info!(
            viewer = %ctx.viewer(),
            filter,
            matched = count_nodes(&found),
            "Content tree searched"
        );
        Ok(found)
    }
}

fn count_nodes(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::count).sum()
}
