//! Trusted drug reference.
//!
//! An ordered, read-only set of verified [`DrugRecord`]s. Lookup normalizes
//! the detected name (trim + lower-case) and returns the first record whose
//! key the configured [`NameMatcher`] accepts.

mod dataset;
mod matcher;

pub use dataset::builtin_records;
pub use matcher::*;

use std::collections::HashSet;

use thiserror::Error;

use crate::models::DrugRecord;

/// Reference loading errors.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Duplicate reference key: {0}")]
    DuplicateKey(String),

    #[error("Reference record has an empty key (full name: {0})")]
    EmptyKey(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Normalize a name for lookup: trim surrounding whitespace, lower-case.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Curated, verified drug records in a fixed order.
pub struct TrustedReference {
    records: Vec<DrugRecord>,
    matcher: Box<dyn NameMatcher>,
}

impl TrustedReference {
    /// Build a reference from records, normalizing keys.
    ///
    /// Rejects empty keys and keys that collide after normalization.
    pub fn new(records: Vec<DrugRecord>) -> ReferenceResult<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(records.len());

        for mut record in records {
            record.key = normalize_name(&record.key);
            if record.key.is_empty() {
                return Err(ReferenceError::EmptyKey(record.full_name));
            }
            if !seen.insert(record.key.clone()) {
                return Err(ReferenceError::DuplicateKey(record.key));
            }
            normalized.push(record);
        }

        Ok(Self {
            records: normalized,
            matcher: Box::new(SubstringMatcher),
        })
    }

    /// The built-in dataset with substring matching.
    pub fn builtin() -> Self {
        Self {
            records: builtin_records(),
            matcher: Box::new(SubstringMatcher),
        }
    }

    /// Load records from a JSON array of [`DrugRecord`] objects.
    pub fn from_json(json: &str) -> ReferenceResult<Self> {
        let records: Vec<DrugRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Replace the name matcher.
    pub fn with_matcher(mut self, matcher: impl NameMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Find the first record whose key matches the detected name.
    pub fn lookup(&self, detected_name: &str) -> Option<&DrugRecord> {
        let name = normalize_name(detected_name);
        self.records
            .iter()
            .find(|record| self.matcher.matches(&record.key, &name))
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&DrugRecord> {
        let key = normalize_name(key);
        self.records.iter().find(|record| record.key == key)
    }

    /// Records in lookup order.
    pub fn records(&self) -> impl Iterator<Item = &DrugRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TrustedReference {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for TrustedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustedReference")
            .field("keys", &self.records.iter().map(|r| &r.key).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_keys() {
        let reference = TrustedReference::builtin();
        let keys: Vec<&str> = reference.records().map(|r| r.key.as_str()).collect();

        assert_eq!(keys, vec!["parol", "arveles", "aspirin", "calpol"]);
        for key in keys {
            assert_eq!(normalize_name(key), key);
        }
    }

    #[test]
    fn test_lookup_case_and_whitespace() {
        let reference = TrustedReference::builtin();

        assert_eq!(reference.lookup("PAROL tablet").unwrap().key, "parol");
        assert_eq!(reference.lookup("  parol tablet  ").unwrap().key, "parol");
        assert_eq!(reference.lookup("\tCalpol 6 Plus\n").unwrap().key, "calpol");
    }

    #[test]
    fn test_lookup_miss() {
        let reference = TrustedReference::builtin();

        assert!(reference.lookup("ibuprofen xr").is_none());
        assert!(reference.lookup("").is_none());
        assert!(reference.lookup("I cannot read this box").is_none());
    }

    #[test]
    fn test_first_key_wins() {
        let reference = TrustedReference::builtin();

        // Both "aspirin" and "parol" appear; "parol" is defined first
        let record = reference.lookup("aspirin parol combo").unwrap();
        assert_eq!(record.key, "parol");
    }

    #[test]
    fn test_new_normalizes_keys() {
        let reference = TrustedReference::new(vec![DrugRecord::new(
            "  Nurofen ",
            "Nurofen 200 mg",
            "Ibuprofen",
            "Pain relief.",
            "Take with food.",
        )])
        .unwrap();

        assert_eq!(reference.get("NUROFEN").unwrap().key, "nurofen");
        assert!(reference.lookup("Nurofen Express").is_some());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = TrustedReference::new(vec![
            DrugRecord::new("parol", "A", "x", "u", "w"),
            DrugRecord::new("PAROL ", "B", "x", "u", "w"),
        ]);

        assert!(matches!(result, Err(ReferenceError::DuplicateKey(k)) if k == "parol"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = TrustedReference::new(vec![DrugRecord::new("   ", "Blank", "x", "u", "w")]);
        assert!(matches!(result, Err(ReferenceError::EmptyKey(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"key": "Nurofen", "full_name": "Nurofen 200 mg", "active_ingredient": "Ibuprofen",
             "usage": "Pain relief.", "warning": "Take with food."}
        ]"#;
        let reference = TrustedReference::from_json(json).unwrap();

        assert_eq!(reference.len(), 1);
        assert_eq!(reference.records().next().unwrap().key, "nurofen");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            TrustedReference::from_json("{not json"),
            Err(ReferenceError::Json(_))
        ));
    }

    #[test]
    fn test_custom_matcher() {
        let reference = TrustedReference::builtin().with_matcher(SimilarityMatcher::default());

        assert!(TrustedReference::builtin().lookup("parool").is_none());
        assert_eq!(reference.lookup("Parool 500").unwrap().key, "parol");
    }
}
