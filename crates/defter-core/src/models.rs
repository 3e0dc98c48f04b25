//! Shared data types for the application.

/// Value of a raw database field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Stored directly under the field.
    Plain(String),
    /// Stored one level down, inside the protected-value wrapper.
    Protected { inner: String },
}

/// A single `key = value` pair of a raw entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    pub key: String,
    pub value: RawValue,
}

/// An entry as handed over by the database loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub fields: Vec<RawField>,
}

impl RawEntry {
    /// Create an entry with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain field.
    pub fn with_plain(mut self, key: &str, value: &str) -> Self {
        self.fields.push(RawField {
            key: key.to_string(),
            value: RawValue::Plain(value.to_string()),
        });
        self
    }

    /// Append a protected field.
    pub fn with_protected(mut self, key: &str, value: &str) -> Self {
        self.fields.push(RawField {
            key: key.to_string(),
            value: RawValue::Protected {
                inner: value.to_string(),
            },
        });
        self
    }

    /// First field with the given key.
    pub fn field(&self, key: &str) -> Option<&RawValue> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }
}

/// A display label together with the value found for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: String,
    pub value: Option<String>,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, value: Option<String>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// The value, unless it is absent or empty.
    pub fn present(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Normalized five-field view of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedEntry {
    pub title: LabeledValue,
    pub password: LabeledValue,
    pub notes: LabeledValue,
    pub url: LabeledValue,
    pub username: LabeledValue,
}

impl ProjectedEntry {
    /// Fields in display order.
    pub fn fields(&self) -> [&LabeledValue; 5] {
        [
            &self.title,
            &self.password,
            &self.notes,
            &self.url,
            &self.username,
        ]
    }

    /// Title used for searching. Untitled entries search as the empty string.
    pub fn title(&self) -> &str {
        self.title.value.as_deref().unwrap_or_default()
    }
}

/// Projected entries of one session, in database order.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    entries: Vec<ProjectedEntry>,
}

impl EntryIndex {
    pub fn new(entries: Vec<ProjectedEntry>) -> Self {
        Self { entries }
    }

    /// Titles in database order, duplicates included.
    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.title().to_string()).collect()
    }

    /// Resolve a title back to its entry. The first entry wins when titles collide.
    pub fn find_by_title(&self, title: &str) -> Option<&ProjectedEntry> {
        self.entries.iter().find(|e| e.title() == title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
