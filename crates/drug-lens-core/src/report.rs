//! Text reports for photo identification results.
//!
//! The client app shows these blocks verbatim, so headers and spacing are
//! part of the API.

use crate::models::{DrugRecord, ResolutionResult};

/// Header for answers served from the trusted reference.
pub const VERIFIED_HEADER: &str = "✅ VERIFIED DATABASE MATCH";

/// Header for model-generated answers. The leading space is intentional.
pub const UNVERIFIED_HEADER: &str = " AI GENERATED INFO (Not Verified)";

/// Render a resolution result as the user-facing analysis text.
pub fn render_report(result: &ResolutionResult) -> String {
    match result {
        ResolutionResult::Verified { record } => render_verified(record),
        ResolutionResult::Unverified {
            detected_name,
            ai_summary,
        } => render_unverified(detected_name, ai_summary),
    }
}

fn render_verified(record: &DrugRecord) -> String {
    format!(
        "{VERIFIED_HEADER}\nName: {}\n\n💊 Usage: {}\n\n⚠️ Warning: {}",
        record.full_name, record.usage, record.warning
    )
}

fn render_unverified(detected_name: &str, ai_summary: &str) -> String {
    format!("{UNVERIFIED_HEADER}\nSystem read: '{detected_name}'\n\n{ai_summary}")
}
