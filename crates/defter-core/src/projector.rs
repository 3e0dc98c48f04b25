//! Projection of raw database entries onto the five displayed fields.

use crate::models::{EntryIndex, LabeledValue, ProjectedEntry, RawEntry, RawValue};

/// Which of the five slots of a [`ProjectedEntry`] a field fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Title,
    Password,
    Notes,
    Url,
    Username,
}

/// How one slot is read from a raw entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub slot: Slot,
    /// Field name in the database.
    pub key: String,
    /// Label shown to the user.
    pub label: String,
    /// Read the value from inside the protected-value wrapper.
    pub protected: bool,
}

impl FieldSpec {
    pub fn plain(slot: Slot, key: &str, label: &str) -> Self {
        Self {
            slot,
            key: key.to_string(),
            label: label.to_string(),
            protected: false,
        }
    }

    pub fn protected(slot: Slot, key: &str, label: &str) -> Self {
        Self {
            protected: true,
            ..Self::plain(slot, key, label)
        }
    }

    fn extract(&self, raw: &RawEntry) -> LabeledValue {
        let value = match (raw.field(&self.key), self.protected) {
            (Some(RawValue::Plain(v)), false) => Some(v.clone()),
            (Some(RawValue::Protected { inner }), true) => Some(inner.clone()),
            _ => None,
        };
        LabeledValue::new(self.label.clone(), value)
    }
}

/// Maps raw entries to [`ProjectedEntry`] values using a field table.
#[derive(Debug, Clone)]
pub struct EntryProjector {
    fields: Vec<FieldSpec>,
}

impl Default for EntryProjector {
    /// The standard KeePass field names.
    fn default() -> Self {
        Self {
            fields: vec![
                FieldSpec::plain(Slot::Title, "Title", "title"),
                FieldSpec::protected(Slot::Password, "Password", "password"),
                FieldSpec::plain(Slot::Notes, "Notes", "notes"),
                FieldSpec::plain(Slot::Url, "URL", "url"),
                FieldSpec::plain(Slot::Username, "UserName", "username"),
            ],
        }
    }
}

impl EntryProjector {
    /// Build a projector from a field table. Slots the table leaves out are
    /// projected as absent under their default label; if a slot is listed
    /// twice the first spec is used.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    fn spec(&self, slot: Slot) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.slot == slot)
    }

    fn slot_value(&self, raw: &RawEntry, slot: Slot, fallback_label: &str) -> LabeledValue {
        match self.spec(slot) {
            Some(spec) => spec.extract(raw),
            None => LabeledValue::new(fallback_label, None),
        }
    }

    /// Project one entry. Never fails: a missing field is an absent value.
    pub fn project(&self, raw: &RawEntry) -> ProjectedEntry {
        ProjectedEntry {
            title: self.slot_value(raw, Slot::Title, "title"),
            password: self.slot_value(raw, Slot::Password, "password"),
            notes: self.slot_value(raw, Slot::Notes, "notes"),
            url: self.slot_value(raw, Slot::Url, "url"),
            username: self.slot_value(raw, Slot::Username, "username"),
        }
    }

    /// Project every entry, keeping database order.
    pub fn project_all(&self, raw: &[RawEntry]) -> EntryIndex {
        EntryIndex::new(raw.iter().map(|r| self.project(r)).collect())
    }
}
