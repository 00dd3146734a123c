//! Configuration
//!
//! Layered settings for the engine: built-in defaults, then an optional
//! global file, then an explicit file, then `CONTREE__SECTION__KEY`
//! environment variables. See [`ConfigLoader`].

pub mod facade;
pub mod merge {
    pub(crate) mod policy;
    pub mod service;
}
pub mod paths {
    pub mod xdg_root;
}
pub mod sources {
    pub mod environment;
    pub mod global_file;
}

pub use facade::ConfigLoader;

use crate::drafts::reaper::DEFAULT_RETENTION_DAYS;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound on concurrent source adapters
pub const DEFAULT_MAX_WORKERS: usize = 6;

/// Default per-adapter deadline in milliseconds
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentTreeConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub gather: GatherConfig,

    #[serde(default)]
    pub drafts: DraftConfig,
}

impl ContentTreeConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.gather.max_workers == 0 {
            return Err(ApiError::ConfigError(
                "gather.max_workers must be at least 1".to_string(),
            ));
        }
        if self.drafts.retention_days == 0 {
            return Err(ApiError::ConfigError(
                "drafts.retention_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Worker pool and deadline settings for the gatherer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherConfig {
    /// Pool size cap; the actual size is also bounded by available parallelism
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Deadline per adapter call; 0 waits forever
    #[serde(default = "default_adapter_timeout_ms")]
    pub adapter_timeout_ms: u64,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_adapter_timeout_ms() -> u64 {
    DEFAULT_ADAPTER_TIMEOUT_MS
}

impl GatherConfig {
    pub fn adapter_timeout(&self) -> Option<Duration> {
        match self.adapter_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            adapter_timeout_ms: default_adapter_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Auto-saved drafts older than this are deleted while the tree is built
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS as u32
}

impl DraftConfig {
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_days))
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
        }
    }
}
