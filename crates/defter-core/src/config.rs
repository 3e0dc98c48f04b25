//! Configuration file handling.
//!
//! Reads from `~/.defterrc.json` unless the store is pointed elsewhere.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const CONFIG_FILE_NAME: &str = ".defterrc.json";

/// The three secrets needed to open a database.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Master password of the database.
    pub password: String,
    /// Path to the key file.
    pub keyfile_path: String,
    /// Path to the KeePass database file.
    pub database_path: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("password", &"<redacted>")
            .field("keyfile_path", &self.keyfile_path)
            .field("database_path", &self.database_path)
            .finish()
    }
}

impl Config {
    pub fn new(
        password: impl Into<String>,
        keyfile_path: impl Into<String>,
        database_path: impl Into<String>,
    ) -> Self {
        Self {
            password: password.into(),
            keyfile_path: keyfile_path.into(),
            database_path: database_path.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.password.is_empty() {
            return Err(ConfigError::Incomplete("password not found, reset your config"));
        }
        if self.keyfile_path.is_empty() {
            return Err(ConfigError::Incomplete("key not found, reset your config"));
        }
        if self.database_path.is_empty() {
            return Err(ConfigError::Incomplete("db not found, reset your config"));
        }
        Ok(())
    }
}

/// On-disk shape. Every field is optional here so that a missing field is
/// reported as incomplete rather than as a parse error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredConfig {
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    keyfile_path: Option<String>,
    #[serde(default)]
    database_path: Option<String>,
}

impl From<StoredConfig> for Config {
    fn from(stored: StoredConfig) -> Self {
        Self {
            password: stored.password.unwrap_or_default(),
            keyfile_path: stored.keyfile_path.unwrap_or_default(),
            database_path: stored.database_path.unwrap_or_default(),
        }
    }
}

/// Loads and saves the [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.defterrc.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config. Partial configs are rejected as a whole.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| ConfigError::NotFound {
                path: self.path.clone(),
                source,
            })?;

        let corrupt = |source: serde_json::Error| ConfigError::Corrupt {
            path: self.path.clone(),
            source,
        };

        // A JSON array would otherwise deserialize positionally into the struct.
        let value: serde_json::Value = serde_json::from_str(&contents).map_err(corrupt)?;
        if !value.is_object() {
            return Err(corrupt(<serde_json::Error as serde::de::Error>::custom(
                "expected a JSON object",
            )));
        }
        let stored: StoredConfig = serde_json::from_value(value).map_err(corrupt)?;

        let config = Config::from(stored);
        config.validate()?;

        tracing::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Replace the config file.
    ///
    /// The new contents go to a temporary file next to the target which is
    /// then renamed over it, so readers see either the old or the new file.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;

        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut contents = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut contents, formatter);
        config
            .serialize(&mut serializer)
            .map_err(|e| write_err(e.into()))?;

        // NamedTempFile is created readable by the owner only.
        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        file.write_all(&contents).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::info!("Wrote config to {}", self.path.display());
        Ok(())
    }
}
