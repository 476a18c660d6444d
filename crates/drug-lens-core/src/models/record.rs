//! Verified drug reference records.

use serde::{Deserialize, Serialize};

/// A single verified entry in the trusted drug reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrugRecord {
    /// Normalized lookup key (lower-case, trimmed), e.g. "parol"
    pub key: String,
    /// Display name as printed on the package
    pub full_name: String,
    /// Active pharmaceutical ingredient
    pub active_ingredient: String,
    /// What the drug is used for
    pub usage: String,
    /// Key safety note
    pub warning: String,
}

impl DrugRecord {
    /// Create a new record. The key is stored as given; normalization happens
    /// when the record is loaded into a reference.
    pub fn new(
        key: impl Into<String>,
        full_name: impl Into<String>,
        active_ingredient: impl Into<String>,
        usage: impl Into<String>,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            full_name: full_name.into(),
            active_ingredient: active_ingredient.into(),
            usage: usage.into(),
            warning: warning.into(),
        }
    }
}
