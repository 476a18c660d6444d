//! Prompts for drug identification and pharmacist answers.

/// Instruction sent alongside the package photo.
pub const NAME_EXTRACTION_PROMPT: &str =
    "Read the most prominent drug brand name on this box. Output ONLY the name.";

/// Prompt for drugs missing from the trusted reference.
///
/// The fixed format is a request to the model, not something the service
/// checks; the answer is forwarded as-is.
pub fn make_general_knowledge_prompt(detected_name: &str) -> String {
    format!(
        r#"The user uploaded a photo of a drug named '{}'.
It is NOT in my local verified database.

Using your general medical knowledge, please provide a brief summary.
Format exactly like this:
Name: [Correct Capitalized Name]
💊 Usage: [Short usage info]
⚠️ Warning: [Key warnings]

Add a disclaimer at the end that this is AI generated."#,
        detected_name
    )
}

/// Prompt for a free-text question about a named drug.
pub fn make_pharmacist_prompt(drug_name: &str, question: &str) -> String {
    format!(
        "Drug: {}. Question: {}. Answer briefly as a pharmacist.",
        drug_name, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_knowledge_prompt() {
        let prompt = make_general_knowledge_prompt("ibuprofen xr");
        assert!(prompt.contains("a drug named 'ibuprofen xr'"));
        assert!(prompt.contains("NOT in my local verified database"));
        assert!(prompt.contains("💊 Usage:"));
        assert!(prompt.contains("⚠️ Warning:"));
        assert!(prompt.contains("AI generated"));
    }

    #[test]
    fn test_pharmacist_prompt() {
        let prompt = make_pharmacist_prompt("Aspirin", "Can I take this with food?");
        assert_eq!(
            prompt,
            "Drug: Aspirin. Question: Can I take this with food?. Answer briefly as a pharmacist."
        );
    }

    #[test]
    fn test_extraction_prompt_asks_for_name_only() {
        assert!(NAME_EXTRACTION_PROMPT.contains("brand name"));
        assert!(NAME_EXTRACTION_PROMPT.contains("ONLY the name"));
    }
}
