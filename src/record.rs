use crate::parser::frontmatter::Frontmatter;

/// Ordered string map: keys keep the position of their first insertion,
/// re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One table row: `paper`, then frontmatter fields, then sections.
pub type Record = FieldMap;

pub const PAPER_COLUMN: &str = "paper";

/// Later sources overwrite earlier ones on key collision.
pub fn build_record(title: &str, frontmatter: &Frontmatter, sections: &FieldMap) -> Record {
    let mut record = Record::new();
    record.insert(PAPER_COLUMN, title);
    for (key, value) in frontmatter.fields() {
        record.insert(key, value);
    }
    for (key, value) in sections.iter() {
        record.insert(key, value);
    }
    record
}

// ── Tests ──
