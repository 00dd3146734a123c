//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::ContentTreeConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global config file (if any) and the environment.
    pub fn load() -> Result<ContentTreeConfig, ApiError> {
        let config = MergeService::load(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load with `path` layered over the global file; the file must exist.
    pub fn load_from_file(path: &Path) -> Result<ContentTreeConfig, ApiError> {
        let config = MergeService::load(Some(path))?;
        config.validate()?;
        Ok(config)
    }

    /// Either of the above, depending on whether a path was given.
    pub fn load_optional(path: Option<&Path>) -> Result<ContentTreeConfig, ApiError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }
}
