//! Drug-Lens Core Library
//!
//! Verified drug reference and identification reports for the drug-lens
//! service.
//!
//! # Architecture
//!
//! ```text
//! Photo → Name Extraction (model) → Trusted Reference lookup
//!                                         │
//!                        ┌────────────────┴────────────────┐
//!                        ▼                                 ▼
//!                 match: Verified                miss: General-knowledge
//!                 (reference only)               prompt (model) → Unverified
//!                        │                                 │
//!                        └────────────────┬────────────────┘
//!                                         ▼
//!                                   Text report
//! ```
//!
//! # Core Principle
//!
//! **Verified answers come only from the reference.** A verified result never
//! contains model output.
//!
//! # Modules
//!
//! - [`models`]: Domain types (DrugRecord, ResolutionResult)
//! - [`reference`]: Trusted reference with pluggable name matchers
//! - [`report`]: User-facing analysis text

pub mod models;
pub mod reference;
pub mod report;

// Re-export commonly used types
pub use models::{DrugRecord, ResolutionResult, TrustTier};
pub use reference::{
    normalize_name, NameMatcher, ReferenceError, SimilarityMatcher, SubstringMatcher,
    TrustedReference,
};
pub use report::render_report;
