//! Merge policy: built-in defaults form the lowest layer.

use crate::config::ContentTreeConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&ContentTreeConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
