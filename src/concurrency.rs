//! Request-scoped bounded worker pool
//!
//! Each aggregation call builds its own pool, runs its jobs and drops it when
//! the call returns. Jobs hold a permit for their whole run, so at most
//! `size` of them execute at once. Joining is all-or-nothing: the first
//! failed job aborts the rest.

use crate::error::ApiError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Pool size: available parallelism capped at `max_workers`, never zero
pub fn pool_size(max_workers: usize) -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    available.min(max_workers).max(1)
}

pub struct RequestPool<T> {
    permits: Arc<Semaphore>,
    tasks: JoinSet<(usize, Result<T, ApiError>)>,
    size: usize,
    spawned: usize,
}

impl<T: Send + 'static> RequestPool<T> {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            tasks: JoinSet::new(),
            size,
            spawned: 0,
        }
    }

    /// Pool sized by `pool_size`
    pub fn bounded(max_workers: usize) -> Self {
        Self::new(pool_size(max_workers))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a job; returns its slot in the joined result
    pub fn spawn<F>(&mut self, job: F) -> usize
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let index = self.spawned;
        self.spawned += 1;
        let permits = Arc::clone(&self.permits);
        self.tasks.spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return (
                        index,
                        Err(ApiError::TaskFailed("worker pool closed".to_string())),
                    )
                }
            };
            (index, job.await)
        });
        index
    }

    /// Wait for every job, in spawn order, or fail with the first error seen
    pub async fn join_all(mut self) -> Result<Vec<T>, ApiError> {
        let mut slots: Vec<Option<T>> = (0..self.spawned).map(|_| None).collect();

        while let Some(joined) = self.tasks.join_next().await {
            let (index, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    self.tasks.abort_all();
                    return Err(ApiError::TaskFailed(e.to_string()));
                }
            };
            match result {
                Ok(value) => slots[index] = Some(value),
                Err(e) => {
                    debug!(
                        failed_slot = index,
                        outstanding = self.tasks.len(),
                        "Aborting remaining jobs"
                    );
                    self.tasks.abort_all();
                    return Err(e);
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| ApiError::TaskFailed(format!("job {} produced no result", index)))
            })
            .collect()
    }
}
