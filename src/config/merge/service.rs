//! MergeService: orchestrates sources, applies merge policy, deserializes to ContentTreeConfig.

use crate::config::merge::policy;
use crate::config::sources::{environment, global_file};
use crate::config::ContentTreeConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<ContentTreeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.display().to_string()));
                }
                debug!(path = %path.display(), "Loading config file");
                builder.add_source(File::from(path).required(true))
            }
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
