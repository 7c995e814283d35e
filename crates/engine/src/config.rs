//! Instance configuration via `kvbridge.toml`
//!
//! On first open of a durable instance, a default `kvbridge.toml` is created
//! in the data directory. To change settings, edit the file and reopen.
//! In-memory instances never read a config file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "kvbridge.toml";

/// How hard the command log pushes records to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    /// Flush each record to the OS, fsync on close
    #[default]
    Standard,
    /// fsync after every record
    Always,
}

/// Instance configuration loaded from `kvbridge.toml`.
///
/// # Example
///
/// ```toml
/// # Durability mode: "standard" (default) or "always"
/// durability = "standard"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Durability mode: `"standard"` or `"always"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
}

fn default_durability_str() -> String {
    "standard".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            durability: default_durability_str(),
        }
    }
}

impl EngineConfig {
    /// Parse the durability string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"standard"` or `"always"`.
    pub fn durability_mode(&self) -> Result<Durability, ConfigError> {
        match self.durability.as_str() {
            "standard" => Ok(Durability::Standard),
            "always" => Ok(Durability::Always),
            other => Err(ConfigError::Invalid {
                reason: format!(
                    "durability mode '{}' in {}, expected \"standard\" or \"always\"",
                    other, CONFIG_FILE_NAME
                ),
            }),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kvbridge instance configuration
#
# Durability mode: "standard" (default) or "always"
#   "standard" = flush every write to the OS, fsync on close
#   "always"   = fsync every write, zero data loss
durability = "standard"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// unsupported durability mode.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.durability_mode()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}
