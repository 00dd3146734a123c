//! Security collaborators
//!
//! The permission model itself lives in an external security provider. The
//! engine only asks yes/no questions through `PermissionOracle` and resolves
//! users through `IdentityDirectory`.

use crate::error::StoreError;
use crate::tree::PermissionResource;
use crate::types::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Resource families understood by the security provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Report,
    Asset,
    DataSource,
    DataSourceFolder,
    Query,
    QueryFolder,
    DataModel,
    Vpm,
    Script,
    ScriptLibrary,
    TableStyle,
    TableStyleLibrary,
    ScheduleTask,
    ScheduleTaskFolder,
    Dashboard,
    SecurityUser,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Action checked against a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceAction {
    Read,
    Write,
    Delete,
    Admin,
}

/// Authorization oracle
pub trait PermissionOracle: Send + Sync {
    fn check_permission(
        &self,
        identity: &Identity,
        resource_type: ResourceType,
        path: &str,
        action: ResourceAction,
    ) -> Result<bool, StoreError>;
}

/// User directory
pub trait IdentityDirectory: Send + Sync {
    /// All users with a private area, in directory order
    fn users(&self) -> Result<Vec<Identity>, StoreError>;

    fn is_system_admin(&self, identity: &Identity) -> Result<bool, StoreError>;
}

/// Oracle wrapper that treats oracle failures as deny
#[derive(Clone)]
pub struct Authorizer {
    oracle: Arc<dyn PermissionOracle>,
}

impl Authorizer {
    pub fn new(oracle: Arc<dyn PermissionOracle>) -> Self {
        Self { oracle }
    }

    pub fn allowed(
        &self,
        identity: &Identity,
        resource_type: ResourceType,
        path: &str,
        action: ResourceAction,
    ) -> bool {
        match self
            .oracle
            .check_permission(identity, resource_type, path, action)
        {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(
                    viewer = %identity,
                    resource_type = %resource_type,
                    path = %path,
                    action = ?action,
                    error = %e,
                    "Permission check failed, denying"
                );
                false
            }
        }
    }

    pub fn allowed_on(
        &self,
        identity: &Identity,
        resource: &PermissionResource,
        action: ResourceAction,
    ) -> bool {
        self.allowed(identity, resource.resource_type, &resource.path, action)
    }

    /// Administrative rights over another user's identity resource
    pub fn is_admin_of(&self, identity: &Identity, owner: &str) -> bool {
        self.allowed(identity, ResourceType::SecurityUser, owner, ResourceAction::Admin)
    }
}
