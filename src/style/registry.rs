//! Registry of named, reusable styles

use super::record::{BalloonStyle, LineStyle, PolyStyle, StyleRecord};

/// A registered style: a single record or an ordered list of records
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    Single(StyleRecord),
    List(Vec<StyleRecord>),
}

impl StyleEntry {
    /// The records of this entry in order
    pub fn records(&self) -> &[StyleRecord] {
        match self {
            StyleEntry::Single(record) => std::slice::from_ref(record),
            StyleEntry::List(records) => records,
        }
    }
}

impl From<StyleRecord> for StyleEntry {
    fn from(record: StyleRecord) -> Self {
        StyleEntry::Single(record)
    }
}

impl From<PolyStyle> for StyleEntry {
    fn from(style: PolyStyle) -> Self {
        StyleEntry::Single(style.into())
    }
}

impl From<LineStyle> for StyleEntry {
    fn from(style: LineStyle) -> Self {
        StyleEntry::Single(style.into())
    }
}

impl From<BalloonStyle> for StyleEntry {
    fn from(style: BalloonStyle) -> Self {
        StyleEntry::Single(style.into())
    }
}

impl From<Vec<StyleRecord>> for StyleEntry {
    fn from(records: Vec<StyleRecord>) -> Self {
        StyleEntry::List(records)
    }
}

/// Per-document table of named styles
///
/// Entries keep registration order so that serialization is deterministic.
/// Re-registering a name replaces the entry in place.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    entries: Vec<(String, StyleEntry)>,
}

impl StyleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the style `name`
    pub fn add_style(&mut self, name: impl Into<String>, entry: impl Into<StyleEntry>) {
        let name = name.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name, entry)),
        }
    }

    /// Look up a style by name
    pub fn get(&self, name: &str) -> Option<&StyleEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    /// Check if a style is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
