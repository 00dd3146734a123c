//! Global config file source: first of config.{toml,yaml,yml,json} in the
//! platform config directory.

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use tracing::debug;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg_root::global_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "Loading global config file");
            Ok(builder.add_source(File::from(path).required(false)))
        }
        None => Ok(builder),
    }
}
