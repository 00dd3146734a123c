//! Error types
//!
//! `StoreError` covers failures reported by the external collaborators
//! (asset store, registries, security provider, draft store). `ApiError` is what
//! callers of the tree service see.

use crate::sources::SourceKind;
use thiserror::Error;

/// Collaborator-level error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid draft file name: {0}")]
    InvalidDraftName(String),
}

/// Caller-facing error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{source_kind} source failed while {context}: {error}")]
    Source {
        source_kind: SourceKind,
        context: String,
        #[source]
        error: StoreError,
    },

    #[error("{source_kind} source did not finish within {timeout_ms}ms")]
    SourceTimeout { source_kind: SourceKind, timeout_ms: u64 },

    #[error("Source task failed: {0}")]
    TaskFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Fixture error: {0}")]
    FixtureError(String),

    #[error("Identity directory error: {0}")]
    Directory(#[source] StoreError),

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// Source adapter that caused the failure, if any
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            ApiError::Source { source_kind, .. } | ApiError::SourceTimeout { source_kind, .. } => {
                Some(*source_kind)
            }
            _ => None,
        }
    }
}
