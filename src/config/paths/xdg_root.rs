//! Platform directories for config and log state.

use crate::error::ApiError;
use directories::ProjectDirs;
use std::path::PathBuf;

const CONFIG_FILE_STEMS: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "contree", "contree")
}

/// Platform config directory, e.g. `$XDG_CONFIG_HOME/contree`
pub fn config_dir() -> Result<PathBuf, ApiError> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            ApiError::ConfigError("Could not determine platform config directory".to_string())
        })
}

/// Platform state directory, e.g. `$XDG_STATE_HOME/contree`
///
/// Falls back to the data-local directory on platforms without a state dir.
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let dirs = project_dirs().ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform state directory".to_string())
    })?;
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_local_dir())
        .to_path_buf())
}

/// First existing global config file, if any
pub fn global_config_file() -> Option<PathBuf> {
    let dir = config_dir().ok()?;
    CONFIG_FILE_STEMS
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
