//! Reference entities: subjects, teachers, rooms.
//!
//! These are looked up by id while merging fragments into events. The
//! engine never fetches them itself; a data-access layer fills a
//! [`ReferenceData`] and hands it over with the request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A subject, teacher or room record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Unique identifier within its kind.
    pub id: String,
    /// Entity classification.
    pub kind: ReferenceKind,
    /// Display name (e.g., "Mathematics", "Ms. Novak", "Lab 2").
    pub name: String,
    /// Abbreviation for compact grids (e.g., "MA", "NOV", "L2").
    pub short_name: String,
    /// Domain-specific metadata (color, building, ...), ordered by key.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// Reference entity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// What is taught.
    Subject,
    /// Who teaches.
    Teacher,
    /// Where it is taught.
    Room,
}

impl Reference {
    /// Creates a record of the given kind.
    pub fn new(id: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: String::new(),
            short_name: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Creates a subject.
    pub fn subject(id: impl Into<String>) -> Self {
        Self::new(id, ReferenceKind::Subject)
    }

    /// Creates a teacher.
    pub fn teacher(id: impl Into<String>) -> Self {
        Self::new(id, ReferenceKind::Teacher)
    }

    /// Creates a room.
    pub fn room(id: impl Into<String>) -> Self {
        Self::new(id, ReferenceKind::Room)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the abbreviation.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Label for display: name, else short name, else id.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.short_name.is_empty() {
            &self.short_name
        } else {
            &self.id
        }
    }
}

/// Id-indexed lookup of reference entities, one table per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    subjects: BTreeMap<String, Reference>,
    teachers: BTreeMap<String, Reference>,
    rooms: BTreeMap<String, Reference>,
}

impl ReferenceData {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record to the table matching its kind. A later record with
    /// the same id replaces the earlier one.
    pub fn insert(&mut self, reference: Reference) {
        self.table_mut(reference.kind)
            .insert(reference.id.clone(), reference);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, reference: Reference) -> Self {
        self.insert(reference);
        self
    }

    /// Looks up a record.
    pub fn get(&self, kind: ReferenceKind, id: &str) -> Option<&Reference> {
        self.table(kind).get(id)
    }

    /// Whether a record exists.
    pub fn contains(&self, kind: ReferenceKind, id: &str) -> bool {
        self.table(kind).contains_key(id)
    }

    /// Resolves an id to its record, or a bare record carrying only the id.
    pub fn resolve(&self, kind: ReferenceKind, id: &str) -> Reference {
        self.get(kind, id)
            .cloned()
            .unwrap_or_else(|| Reference::new(id, kind))
    }

    /// Number of records of a kind.
    pub fn len(&self, kind: ReferenceKind) -> usize {
        self.table(kind).len()
    }

    /// Whether all tables are empty.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty() && self.teachers.is_empty() && self.rooms.is_empty()
    }

    fn table(&self, kind: ReferenceKind) -> &BTreeMap<String, Reference> {
        match kind {
            ReferenceKind::Subject => &self.subjects,
            ReferenceKind::Teacher => &self.teachers,
            ReferenceKind::Room => &self.rooms,
        }
    }

    fn table_mut(&mut self, kind: ReferenceKind) -> &mut BTreeMap<String, Reference> {
        match kind {
            ReferenceKind::Subject => &mut self.subjects,
            ReferenceKind::Teacher => &mut self.teachers,
            ReferenceKind::Room => &mut self.rooms,
        }
    }
}

impl FromIterator<Reference> for ReferenceData {
    fn from_iter<I: IntoIterator<Item = Reference>>(iter: I) -> Self {
        let mut data = Self::new();
        for r in iter {
            data.insert(r);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_builder() {
        let r = Reference::teacher("T1")
            .with_name("Ms. Novak")
            .with_short_name("NOV")
            .with_attribute("department", "Science");

        assert_eq!(r.kind, ReferenceKind::Teacher);
        assert_eq!(r.label(), "Ms. Novak");
        assert_eq!(r.attributes.get("department"), Some(&"Science".to_string()));
    }

    #[test]
    fn test_label_fallback() {
        assert_eq!(Reference::room("R1").with_short_name("L2").label(), "L2");
        assert_eq!(Reference::room("R1").label(), "R1");
    }

    #[test]
    fn test_lookup_is_per_kind() {
        let data: ReferenceData = vec![
            Reference::subject("X").with_name("Subject X"),
            Reference::room("X").with_name("Room X"),
        ]
        .into_iter()
        .collect();

        assert_eq!(data.get(ReferenceKind::Subject, "X").unwrap().name, "Subject X");
        assert_eq!(data.get(ReferenceKind::Room, "X").unwrap().name, "Room X");
        assert!(!data.contains(ReferenceKind::Teacher, "X"));
        assert_eq!(data.len(ReferenceKind::Subject), 1);
    }

    #[test]
    fn test_resolve_unknown_yields_bare_record() {
        let data = ReferenceData::new();
        let r = data.resolve(ReferenceKind::Teacher, "T404");
        assert_eq!(r.id, "T404");
        assert_eq!(r.kind, ReferenceKind::Teacher);
        assert!(r.name.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn test_attributes_serialize_in_key_order() {
        let build = || {
            (0..12).fold(Reference::subject("MATH"), |r, i| {
                r.with_attribute(format!("k{i}"), "v")
            })
        };
        let a = serde_json::to_string(&build()).unwrap();
        let b = serde_json::to_string(&build()).unwrap();
        assert_eq!(a, b);
        assert!(a.find("\"k0\"").unwrap() < a.find("\"k1\"").unwrap());
        assert!(a.find("\"k10\"").unwrap() < a.find("\"k2\"").unwrap());
    }

    #[test]
    fn test_attributes_default_when_absent() {
        let r: Reference = serde_json::from_str(
            r#"{"id":"R1","kind":"Room","name":"Lab","short_name":"L"}"#,
        )
        .unwrap();
        assert_eq!(r.label(), "Lab");
        assert!(r.attributes.is_empty());
    }
}
