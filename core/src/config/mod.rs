//! Server registry configuration.
//!
//! The tracker treats [`ServerKey`] as opaque; this module is where an
//! embedding host declares which guild + game-server pairs it tracks. The
//! registry lives in the platform config directory (managed by confy) and
//! can also be loaded from an explicit TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use headcount_types::ServerKey;

/// App name used for the confy-managed config location.
pub const APP_NAME: &str = "headcount";

/// One tracked game server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEntry {
    pub guild_id: u64,
    pub server_id: String,
    /// Human-readable name for status surfaces; defaults to the server id.
    #[serde(default)]
    pub display_name: String,
}

impl ServerEntry {
    pub fn key(&self) -> ServerKey {
        ServerKey::new(self.guild_id, self.server_id.as_str())
    }

    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.server_id
        } else {
            &self.display_name
        }
    }
}

/// The full server registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

impl TrackerConfig {
    /// Load the registry from the platform config location, creating a
    /// default (empty) file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Persist the registry back to the platform config location.
    pub fn store(&self) -> Result<(), ConfigError> {
        Ok(confy::store(APP_NAME, None, self)?)
    }

    /// Load a registry from an explicit TOML file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn find(&self, guild_id: u64, server_id: &str) -> Option<&ServerEntry> {
        self.servers
            .iter()
            .find(|s| s.guild_id == guild_id && s.server_id == server_id)
    }
}

/// Path of the confy-managed registry file, for status output.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config load/store failed: {0}")]
    Store(#[from] confy::ConfyError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid server registry in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_server_registry_toml() {
        let toml = r#"
[[servers]]
guild_id = 690129185314118
server_id = "emerald-eu-1"
display_name = "Emerald EU"

[[servers]]
guild_id = 690129185314118
server_id = "emerald-us-1"
"#;

        let config: TrackerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.servers[0].display_name(), "Emerald EU");
        assert_eq!(config.servers[1].display_name(), "emerald-us-1");
        assert!(config.find(690129185314118, "emerald-eu-1").is_some());
        assert!(config.find(1, "emerald-eu-1").is_none());

        let key = config.servers[0].key();
        assert_eq!(key.to_string(), "690129185314118_emerald-eu-1");
    }

    #[test]
    fn empty_registry_is_valid() {
        let config: TrackerConfig = toml::from_str("").unwrap();
        assert!(config.servers.is_empty());
    }
}
