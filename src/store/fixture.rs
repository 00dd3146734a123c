//! Fixture files describing every collaborator's contents
//!
//! YAML (`.yaml`/`.yml`) or JSON. Used by the CLI and integration tests to
//! stand up in-memory stores.

use super::memory::{
    GrantTableOracle, InMemoryAssetStore, InMemoryDirectory, InMemoryDraftStore, InMemoryRegistry,
};
use super::Collaborators;
use crate::error::ApiError;
use crate::security::{ResourceAction, ResourceType};
use crate::sources::{AssetEntry, RecycleRecord, RegistryCategory};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureUser {
    pub name: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureGrant {
    pub user: String,
    pub resource: ResourceType,
    pub path: String,
    pub actions: Vec<ResourceAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRegistryList {
    pub category: RegistryCategory,
    #[serde(default)]
    pub scope: Option<String>,
    pub names: Vec<String>,
}

/// Draft timestamp: absolute epoch millis, or an age relative to load time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDraft {
    pub file: String,
    #[serde(default)]
    pub last_modified: Option<i64>,
    #[serde(default)]
    pub age_hours: Option<i64>,
}

impl FixtureDraft {
    fn timestamp(&self, now: DateTime<Utc>) -> i64 {
        match (self.last_modified, self.age_hours) {
            (Some(ts), _) => ts,
            (None, Some(hours)) => (now - Duration::hours(hours)).timestamp_millis(),
            (None, None) => now.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub users: Vec<FixtureUser>,
    /// Users that pass every permission check
    pub superusers: Vec<String>,
    pub grants: Vec<FixtureGrant>,
    pub assets: Vec<AssetEntry>,
    pub trash: Vec<AssetEntry>,
    pub recycle: Vec<RecycleRecord>,
    /// Stored content paths backing recycle records
    pub contents: Vec<String>,
    pub registry: Vec<FixtureRegistryList>,
    pub drafts: Vec<FixtureDraft>,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApiError::FixtureError(format!("Failed to read fixture {:?}: {}", path, e))
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            serde_yaml::from_str(&raw).map_err(|e| {
                ApiError::FixtureError(format!("Invalid YAML fixture {:?}: {}", path, e))
            })
        } else {
            serde_json::from_str(&raw).map_err(|e| {
                ApiError::FixtureError(format!("Invalid JSON fixture {:?}: {}", path, e))
            })
        }
    }

    /// Populate in-memory collaborators; relative draft ages resolve against `now`
    pub fn into_collaborators(self, now: DateTime<Utc>) -> Collaborators {
        let assets = InMemoryAssetStore::new();
        self.assets.into_iter().for_each(|e| assets.add_entry(e));
        self.trash.into_iter().for_each(|e| assets.add_trash_entry(e));
        self.recycle
            .into_iter()
            .for_each(|r| assets.add_recycle_record(r));
        self.contents.iter().for_each(|p| assets.add_content(p));

        let registry = InMemoryRegistry::new();
        for list in &self.registry {
            for name in &list.names {
                registry.add(list.category, list.scope.as_deref(), name);
            }
        }

        let oracle = GrantTableOracle::new();
        for user in &self.superusers {
            oracle.grant_everything(user);
        }
        for grant in &self.grants {
            for action in &grant.actions {
                oracle.grant(&grant.user, grant.resource, &grant.path, *action);
            }
        }

        let directory = InMemoryDirectory::new();
        for user in &self.users {
            directory.add_user(&user.name, user.admin);
        }

        let drafts = InMemoryDraftStore::new();
        for draft in &self.drafts {
            drafts.insert(&draft.file, draft.timestamp(now));
        }

        Collaborators {
            assets: Arc::new(assets),
            registry: Arc::new(registry),
            oracle: Arc::new(oracle),
            directory: Arc::new(directory),
            drafts: Arc::new(drafts),
        }
    }
}
