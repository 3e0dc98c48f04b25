//! Core types for defter.
//!
//! This crate provides the config store, the KeePass loader and the
//! projection of raw entries that the command-line frontend builds on.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod projector;

pub use config::{Config, ConfigStore};
pub use database::{DatabaseLoader, KeepassLoader};
pub use error::{ConfigError, Error, LoadError, Result};
pub use models::{EntryIndex, LabeledValue, ProjectedEntry, RawEntry, RawField, RawValue};
pub use projector::{EntryProjector, FieldSpec, Slot};
