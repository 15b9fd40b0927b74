//! Server directory configuration for `conn`
//!
//! This module provides the [`ServerDirectory`], loaded once from a YAML file
//! and passed explicitly to the session manager.

mod directory;
mod paths;

pub use directory::{DEFAULT_SSH_PORT, ServerDirectory, ServerEntry};
pub use paths::{
    CONFIG_FILE_NAME, FALLBACK_CONFIG_PATH, TOOL_DIR_NAME, default_config_path,
    resolve_config_path,
};
