//! In-memory collaborators
//!
//! Back the CLI's fixture mode and the test suite. Each store can be switched
//! into a failing state to exercise the all-or-nothing aggregation path.

use crate::drafts::{DraftFile, DraftStore};
use crate::error::StoreError;
use crate::security::{IdentityDirectory, PermissionOracle, ResourceAction, ResourceType};
use crate::sources::{AssetEntry, AssetStore, RecycleRecord, Registry, RegistryCategory};
use crate::tree::sentinel::in_private_area;
use crate::types::Identity;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::warn;

/// Wildcard path matching every resource of a type
pub const ANY_PATH: &str = "*";

#[derive(Default)]
struct FailureSwitch(RwLock<Option<String>>);

impl FailureSwitch {
    fn set(&self, message: &str) {
        *self.0.write() = Some(message.to_string());
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.0.read().as_ref() {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct AssetState {
    entries: Vec<AssetEntry>,
    trash: Vec<AssetEntry>,
    recycle: Vec<RecycleRecord>,
    contents: HashSet<String>,
}

/// Asset store
#[derive(Default)]
pub struct InMemoryAssetStore {
    state: RwLock<AssetState>,
    failure: FailureSwitch,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&self, entry: AssetEntry) {
        self.state.write().entries.push(entry);
    }

    pub fn add_trash_entry(&self, entry: AssetEntry) {
        self.state.write().trash.push(entry);
    }

    pub fn add_recycle_record(&self, record: RecycleRecord) {
        self.state.write().recycle.push(record);
    }

    /// Mark stored content as present for recycle-bin resolution
    pub fn add_content(&self, path: &str) {
        self.state.write().contents.insert(path.to_string());
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

impl AssetStore for InMemoryAssetStore {
    fn entries(&self, owner: Option<&str>) -> Result<Vec<AssetEntry>, StoreError> {
        self.failure.check()?;
        Ok(self
            .state
            .read()
            .entries
            .iter()
            .filter(|entry| entry.owner.as_deref() == owner)
            .cloned()
            .collect())
    }

    fn trash(&self) -> Result<Vec<AssetEntry>, StoreError> {
        self.failure.check()?;
        Ok(self.state.read().trash.clone())
    }

    fn recycle_records(&self) -> Result<Vec<RecycleRecord>, StoreError> {
        self.failure.check()?;
        Ok(self.state.read().recycle.clone())
    }

    fn exists(&self, path: &str) -> Result<bool, StoreError> {
        self.failure.check()?;
        Ok(self.state.read().contents.contains(path))
    }
}

/// Data source, library, schedule and dashboard registry
#[derive(Default)]
pub struct InMemoryRegistry {
    lists: RwLock<BTreeMap<(RegistryCategory, Option<String>), Vec<String>>>,
    failure: FailureSwitch,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, category: RegistryCategory, scope: Option<&str>, name: &str) {
        self.lists
            .write()
            .entry((category, scope.map(str::to_string)))
            .or_default()
            .push(name.to_string());
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

impl Registry for InMemoryRegistry {
    fn list(
        &self,
        category: RegistryCategory,
        scope: Option<&str>,
    ) -> Result<Vec<String>, StoreError> {
        self.failure.check()?;
        Ok(self
            .lists
            .read()
            .get(&(category, scope.map(str::to_string)))
            .cloned()
            .unwrap_or_default())
    }

    fn dashboard_owners(&self) -> Result<Vec<String>, StoreError> {
        self.failure.check()?;
        Ok(self
            .lists
            .read()
            .keys()
            .filter_map(|(category, scope)| match (category, scope) {
                (RegistryCategory::Dashboard, Some(owner)) => Some(owner.clone()),
                _ => None,
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Grant {
    user: String,
    resource_type: ResourceType,
    path: String,
    action: ResourceAction,
}

/// Explicit grant table
///
/// A grant on path `*` covers every path of that resource type. Users marked
/// as superusers pass every check. Every user holds all actions on the report,
/// asset and dashboard resources inside their own private area.
#[derive(Default)]
pub struct GrantTableOracle {
    grants: RwLock<BTreeSet<Grant>>,
    superusers: RwLock<HashSet<String>>,
    failure: FailureSwitch,
}

impl GrantTableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, user: &str, resource_type: ResourceType, path: &str, action: ResourceAction) {
        self.grants.write().insert(Grant {
            user: user.to_string(),
            resource_type,
            path: path.to_string(),
            action,
        });
    }

    pub fn grant_everything(&self, user: &str) {
        self.superusers.write().insert(user.to_string());
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

impl PermissionOracle for GrantTableOracle {
    fn check_permission(
        &self,
        identity: &Identity,
        resource_type: ResourceType,
        path: &str,
        action: ResourceAction,
    ) -> Result<bool, StoreError> {
        self.failure.check()?;
        if self.superusers.read().contains(identity.name()) {
            return Ok(true);
        }
        let private_type = matches!(
            resource_type,
            ResourceType::Report | ResourceType::Asset | ResourceType::Dashboard
        );
        if private_type && in_private_area(identity.name(), path) {
            return Ok(true);
        }
        let grants = self.grants.read();
        let matches = |path: &str| {
            grants.contains(&Grant {
                user: identity.name().to_string(),
                resource_type,
                path: path.to_string(),
                action,
            })
        };
        Ok(matches(path) || matches(ANY_PATH))
    }
}

/// User directory
#[derive(Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<(Identity, bool)>>,
    failure: FailureSwitch,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, name: &str, system_admin: bool) {
        self.users.write().push((Identity::new(name), system_admin));
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

impl IdentityDirectory for InMemoryDirectory {
    fn users(&self) -> Result<Vec<Identity>, StoreError> {
        self.failure.check()?;
        Ok(self.users.read().iter().map(|(id, _)| id.clone()).collect())
    }

    fn is_system_admin(&self, identity: &Identity) -> Result<bool, StoreError> {
        self.failure.check()?;
        Ok(self
            .users
            .read()
            .iter()
            .any(|(id, admin)| *admin && id == identity))
    }
}

/// Auto-save draft store keyed by file name
#[derive(Default)]
pub struct InMemoryDraftStore {
    files: RwLock<BTreeMap<String, i64>>,
    failure: FailureSwitch,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, file_name: &str, last_modified: i64) {
        self.files.write().insert(file_name.to_string(), last_modified);
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.read().contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

impl DraftStore for InMemoryDraftStore {
    fn list(&self) -> Result<Vec<DraftFile>, StoreError> {
        self.failure.check()?;
        let files = self.files.read();
        Ok(files
            .keys()
            .filter_map(|name| match DraftFile::parse(name) {
                Ok(draft) => Some(draft),
                Err(e) => {
                    warn!(file = %name, error = %e, "Skipping unrecognized auto-save file");
                    None
                }
            })
            .collect())
    }

    fn last_modified(&self, draft: &DraftFile) -> Result<i64, StoreError> {
        self.failure.check()?;
        self.files
            .read()
            .get(&draft.file_name)
            .copied()
            .ok_or_else(|| StoreError::NotFound(draft.file_name.clone()))
    }

    fn delete(&self, draft: &DraftFile) -> Result<(), StoreError> {
        self.failure.check()?;
        self.files
            .write()
            .remove(&draft.file_name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(draft.file_name.clone()))
    }
}
