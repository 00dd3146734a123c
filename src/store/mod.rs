//! Collaborator bundle and its in-memory implementations
//!
//! The engine never owns storage; it is handed one implementation of each
//! collaborator trait. `memory` provides process-local implementations and
//! `fixture` fills them from a file.

pub mod fixture;
pub mod memory;

use crate::drafts::DraftStore;
use crate::security::{IdentityDirectory, PermissionOracle};
use crate::sources::{AssetStore, Registry};
use std::sync::Arc;

pub use fixture::Fixture;

/// Every external collaborator the engine calls into
#[derive(Clone)]
pub struct Collaborators {
    pub assets: Arc<dyn AssetStore>,
    pub registry: Arc<dyn Registry>,
    pub oracle: Arc<dyn PermissionOracle>,
    pub directory: Arc<dyn IdentityDirectory>,
    pub drafts: Arc<dyn DraftStore>,
}
