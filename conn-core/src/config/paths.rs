//! Configuration file path resolution

use std::path::{Path, PathBuf};

/// Directory name under `$HOME/.config`
pub const TOOL_DIR_NAME: &str = "conn";

/// File name of the server directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Relative path used when no home directory is known
pub const FALLBACK_CONFIG_PATH: &str = "config/config.yaml";

/// Resolves the configuration file path.
///
/// Priority: explicit path > `<home>/.config/conn/config.yaml` >
/// [`FALLBACK_CONFIG_PATH`]. The home path is chosen whenever a home
/// directory is known, whether or not the file exists there.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>, home: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    match home {
        Some(home) if !home.as_os_str().is_empty() => home
            .join(".config")
            .join(TOOL_DIR_NAME)
            .join(CONFIG_FILE_NAME),
        _ => PathBuf::from(FALLBACK_CONFIG_PATH),
    }
}

/// Resolves the configuration file path against the current user's home
/// directory
#[must_use]
pub fn default_config_path(explicit: Option<&Path>) -> PathBuf {
    resolve_config_path(explicit, dirs::home_dir())
}
