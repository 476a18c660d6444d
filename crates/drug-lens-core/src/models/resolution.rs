//! Outcome of identifying a drug from a photo.

use serde::{Deserialize, Serialize};

use super::DrugRecord;

/// Trust tier attached to an identification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    /// Served entirely from the trusted reference
    Verified,
    /// Raw generative model output, not reviewed
    Unverified,
}

/// Result of resolving a detected drug name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// The detected name matched a reference key.
    Verified { record: DrugRecord },
    /// No key matched; the summary came from the model's general knowledge.
    Unverified {
        detected_name: String,
        ai_summary: String,
    },
}

impl ResolutionResult {
    pub fn tier(&self) -> TrustTier {
        match self {
            ResolutionResult::Verified { .. } => TrustTier::Verified,
            ResolutionResult::Unverified { .. } => TrustTier::Unverified,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, ResolutionResult::Verified { .. })
    }

    /// The verified record, if any.
    pub fn record(&self) -> Option<&DrugRecord> {
        match self {
            ResolutionResult::Verified { record } => Some(record),
            ResolutionResult::Unverified { .. } => None,
        }
    }
}
