//! Name matching strategies for reference lookup.
//!
//! Both arguments are already normalized (lower-case, trimmed) when a
//! matcher is called from [`TrustedReference::lookup`](super::TrustedReference::lookup).

use strsim::{jaro_winkler, normalized_levenshtein};

/// Decides whether a detected name refers to a reference key.
pub trait NameMatcher: Send + Sync {
    fn matches(&self, key: &str, detected_name: &str) -> bool;
}

/// Key contained anywhere in the detected name.
///
/// "parol 500mg" matches "parol". So does "paroloxetine"; this matcher has no
/// notion of word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl NameMatcher for SubstringMatcher {
    fn matches(&self, key: &str, detected_name: &str) -> bool {
        detected_name.contains(key)
    }
}

/// Default similarity threshold for [`SimilarityMatcher`].
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Token-level fuzzy matcher tolerant of OCR-style misreads.
///
/// Falls back to containment first, then compares the key against every
/// alphanumeric token of the detected name.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatcher {
    threshold: f64,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl SimilarityMatcher {
    /// Create a matcher; `threshold` is clamped to 0.0 - 1.0.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl NameMatcher for SimilarityMatcher {
    fn matches(&self, key: &str, detected_name: &str) -> bool {
        if detected_name.contains(key) {
            return true;
        }

        detected_name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| similarity(key, token) >= self.threshold)
    }
}

/// Combined string similarity (0.0 - 1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    // Jaro-Winkler favours shared prefixes, which brand names on boxes usually keep intact
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    jw * 0.6 + lev * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_matcher() {
        let matcher = SubstringMatcher;

        assert!(matcher.matches("parol", "parol 500mg"));
        assert!(matcher.matches("parol", "parol"));
        assert!(matcher.matches("aspirin", "bayer aspirin protect"));
        assert!(!matcher.matches("parol", "parool"));
        assert!(!matcher.matches("parol", ""));
    }

    #[test]
    fn test_similarity_matcher_tolerates_misread() {
        let matcher = SimilarityMatcher::default();

        assert!(matcher.matches("parol", "parool 500 mg"));
        assert!(matcher.matches("arveles", "arveles"));
        assert!(!matcher.matches("parol", "calpol"));
        assert!(!matcher.matches("parol", "ibuprofen xr"));
    }

    #[test]
    fn test_similarity_threshold_clamped() {
        assert_eq!(SimilarityMatcher::new(1.7).threshold(), 1.0);
        assert_eq!(SimilarityMatcher::new(-0.2).threshold(), 0.0);
    }

    #[test]
    fn test_similarity_identical() {
        assert!((similarity("calpol", "calpol") - 1.0).abs() < 0.001);
    }
}
