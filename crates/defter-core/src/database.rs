//! KeePass database loading.

use crate::config::Config;
use crate::error::LoadError;
use crate::models::{RawEntry, RawField, RawValue};
use keepass::db::{Group, Node, Value};
use keepass::{Database, DatabaseKey};
use std::fs::File;
use std::path::Path;

/// Turns the stored secrets into the list of raw entries of a database.
pub trait DatabaseLoader {
    fn open(&self, config: &Config) -> Result<Vec<RawEntry>, LoadError>;
}

/// Loader backed by the `keepass` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepassLoader;

impl KeepassLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DatabaseLoader for KeepassLoader {
    fn open(&self, config: &Config) -> Result<Vec<RawEntry>, LoadError> {
        let mut keyfile = open_file(&config.keyfile_path)?;
        let key = DatabaseKey::new()
            .with_password(&config.password)
            .with_keyfile(&mut keyfile)
            .map_err(|source| LoadError::Io {
                path: config.keyfile_path.clone().into(),
                source,
            })?;

        let mut file = open_file(&config.database_path)?;
        let db = Database::open(&mut file, key)
            .map_err(|e| LoadError::Decryption(format!("{}: {e}", config.database_path)))?;

        let mut entries = Vec::new();
        collect_entries(&db.root, &mut entries);

        tracing::debug!(
            "Loaded {} entries from {}",
            entries.len(),
            config.database_path
        );
        Ok(entries)
    }
}

fn open_file(path: &str) -> Result<File, LoadError> {
    File::open(Path::new(path)).map_err(|source| LoadError::Io {
        path: path.into(),
        source,
    })
}

/// Walk the group tree in stored order, descending into subgroups where
/// they appear among the children.
fn collect_entries(group: &Group, out: &mut Vec<RawEntry>) {
    for node in &group.children {
        match node {
            Node::Entry(e) => out.push(convert_entry(e)),
            Node::Group(g) => collect_entries(g, out),
        }
    }
}

/// Convert a keepass::Entry to our raw entry, keeping protected values
/// behind their wrapper.
fn convert_entry(ke: &keepass::db::Entry) -> RawEntry {
    let mut keys: Vec<&String> = ke.fields.keys().collect();
    keys.sort();

    let fields = keys
        .into_iter()
        .filter_map(|key| {
            let value = match ke.fields.get(key)? {
                Value::Unprotected(s) => RawValue::Plain(s.clone()),
                Value::Protected(_) => RawValue::Protected {
                    inner: ke.get(key)?.to_string(),
                },
                _ => {
                    tracing::debug!("Skipping binary field {}", key);
                    return None;
                }
            };
            Some(RawField {
                key: key.clone(),
                value,
            })
        })
        .collect();

    RawEntry { fields }
}
