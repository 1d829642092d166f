// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading.

use crate::error::{ClintError, ConfigError, Result};
use std::path::{Path, PathBuf};

use super::schema::ClintConfig;

/// Configuration file names to search for, in order of priority.
pub const CONFIG_FILES: &[&str] = &["clint.toml", ".clint.toml", ".config/clint.toml"];

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
    }

    // XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let clint_config = config_dir.join("clint").join("config.toml");
        if clint_config.is_file() {
            return Some(clint_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ClintConfig> {
    match find_config_file() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No configuration file found, using built-in defaults");
            Ok(ClintConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ClintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ClintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ClintConfig> {
    toml::from_str(content).map_err(|e| {
        ClintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}
