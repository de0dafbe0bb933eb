//! Application configuration.
//!
//! Defaults, optionally overridden by a TOML file. The CLI applies its own
//! flags (and their environment variables) on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compliance::model::ComplianceRules;
use crate::error::{VoiceupError, VoiceupResult};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "voiceup.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub compliance: ComplianceRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("voiceup.db"),
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> VoiceupResult<Self> {
        toml::from_str(s).map_err(|e| VoiceupError::Config(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `voiceup.toml` in `dir` is
    /// used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>, dir: &Path) -> VoiceupResult<Self> {
        let file = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&file)
            .map_err(|e| VoiceupError::Config(format!("{}: {}", file.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %file.display(), "config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 8080

            [compliance]
            compliant_threshold = 60
            customer_names = ["Priya"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, PathBuf::from("voiceup.db"));
        assert_eq!(config.compliance.compliant_threshold, 60);
        assert_eq!(config.compliance.customer_names, vec!["Priya".to_string()]);
        assert_eq!(config.compliance.apology_words, ComplianceRules::default().apology_words);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml_str("[server]\nport = \"x\""),
            Err(VoiceupError::Config(_))
        ));
    }

    #[test]
    fn test_load_lookup() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[database]\npath = \"data/v.db\"\n").unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("data/v.db"));

        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing), dir.path()).is_err());
    }
}
