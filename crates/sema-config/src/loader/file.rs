//! File-based configuration loading
//!
//! Format is picked by extension: `.yml`/`.yaml` or `.toml`.

use std::path::Path;

use crate::{error::ConfigError, Config, Result};

/// Load configuration from a file
pub fn from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yml") | Some("yaml") => {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
        Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        _ => Err(ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        }),
    }
}
