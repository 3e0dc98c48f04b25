//! Error types shared by the config store, the database loader and the
//! command-line flows.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A mandatory field is missing or empty.
    #[error("{0}")]
    Incomplete(&'static str),
    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine home directory")]
    NoHome,
}

/// Failure reported by a [`DatabaseLoader`](crate::DatabaseLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    /// Database or key file missing or unreadable.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Wrong credentials or a malformed database.
    #[error("{0}")]
    Decryption(String),
}

/// Top-level error of a defter flow.
///
/// `Display` gives the one-line summary; [`Error::cause`] gives the detail
/// printed on the second line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read config file. Config is missing or corrupted.")]
    ConfigMissingOrInvalid(#[source] ConfigError),
    #[error("Could not set config.")]
    ConfigWriteFailed(#[source] ConfigError),
    #[error("Could not open database.")]
    DatabaseOpenFailed(#[source] LoadError),
    #[error("Could not set config.")]
    ArgumentMissing(&'static str),
}

impl Error {
    /// Human-readable detail for the `Cause:` line.
    pub fn cause(&self) -> String {
        match self {
            Error::ConfigMissingOrInvalid(e) | Error::ConfigWriteFailed(e) => e.to_string(),
            Error::DatabaseOpenFailed(e) => e.to_string(),
            Error::ArgumentMissing(what) => format!("{what} missing"),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_missing_names_the_flag() {
        let err = Error::ArgumentMissing("db");
        assert_eq!(err.to_string(), "Could not set config.");
        assert_eq!(err.cause(), "db missing");
    }

    #[test]
    fn incomplete_config_cause_is_the_bare_message() {
        let err = Error::ConfigMissingOrInvalid(ConfigError::Incomplete(
            "key not found, reset your config",
        ));
        assert!(err.to_string().starts_with("Could not read config file."));
        assert_eq!(err.cause(), "key not found, reset your config");
    }
}
