//! Parallel Gatherer and Tree Merger
//!
//! Runs the source adapters on a request-scoped bounded pool and joins their
//! outputs all-or-nothing. The merger concatenates them in adapter order.

use crate::concurrency::RequestPool;
use crate::config::GatherConfig;
use crate::error::ApiError;
use crate::sources::SourceAdapter;
use crate::tree::Node;
use crate::types::{RequestContext, UsersToLoad};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct Gatherer {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    config: GatherConfig,
}

impl Gatherer {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, config: GatherConfig) -> Self {
        Self { adapters, config }
    }

    /// One node list per adapter, in adapter order
    ///
    /// Every task gets its own copy of `ctx`. Any adapter failure or timeout
    /// fails the whole gather; there is no partial result.
    pub async fn gather(
        &self,
        ctx: &RequestContext,
        users: &UsersToLoad,
    ) -> Result<Vec<Vec<Node>>, ApiError> {
        let mut pool = RequestPool::bounded(self.config.max_workers);
        let timeout = self.config.adapter_timeout();
        debug!(
            viewer = %ctx.viewer(),
            adapters = self.adapters.len(),
            pool_size = pool.size(),
            "Gathering content sources"
        );

        for adapter in &self.adapters {
            pool.spawn(run_adapter(
                Arc::clone(adapter),
                ctx.clone(),
                users.clone(),
                timeout,
            ));
        }

        pool.join_all().await.map_err(|e| {
            warn!(viewer = %ctx.viewer(), error = %e, "Content aggregation failed");
            e
        })
    }
}

async fn run_adapter(
    adapter: Arc<dyn SourceAdapter>,
    ctx: RequestContext,
    users: UsersToLoad,
    timeout: Option<Duration>,
) -> Result<Vec<Node>, ApiError> {
    let source_kind = adapter.kind();
    let started = Instant::now();
    let job = tokio::task::spawn_blocking(move || adapter.fetch(&ctx, &users));

    let joined = match timeout {
        Some(limit) => tokio::time::timeout(limit, job)
            .await
            .map_err(|_| ApiError::SourceTimeout {
                source_kind,
                timeout_ms: limit.as_millis() as u64,
            })?,
        None => job.await,
    };
    let output = joined
        .map_err(|e| ApiError::TaskFailed(format!("{} source task: {}", source_kind, e)))??;

    let nodes = output.into_nodes();
    debug!(
        source = %source_kind,
        roots = nodes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Source adapter finished"
    );
    Ok(nodes)
}

/// Concatenate adapter outputs in adapter order, without deduplication
pub fn merge(lists: Vec<Vec<Node>>) -> Vec<Node> {
    lists.into_iter().flatten().collect()
}
