//! Fuzzy matching of free text against the condition catalog.
//!
//! Every condition name and every symptom string becomes one entry in a
//! flat lookup table; an entry whose token-set similarity with the input
//! reaches the threshold contributes its owning condition to the result.
//! An empty result set means "insufficient information", never an error.

use std::collections::BTreeSet;

use crate::catalog::CatalogStore;
use crate::config;

/// Normalize free text for matching: trim + lowercase.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Token-set similarity between two strings, 0-100.
///
/// Order-insensitive: both inputs are split into word-token sets, and the
/// score is the best normalized Levenshtein similarity among the sorted
/// intersection string and the two intersection-plus-remainder strings.
/// A token set that fully contains the other scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let sect = join(tokens_a.intersection(&tokens_b).copied());
    let diff_ab = join(tokens_a.difference(&tokens_b).copied());
    let diff_ba = join(tokens_b.difference(&tokens_a).copied());

    let combined_ab = concat_tokens(&sect, &diff_ab);
    let combined_ba = concat_tokens(&sect, &diff_ba);

    let best = similarity(&sect, &combined_ab)
        .max(similarity(&sect, &combined_ba))
        .max(similarity(&combined_ab, &combined_ba));
    (best * 100.0).round() as u8
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn concat_tokens(sect: &str, diff: &str) -> String {
    match (sect.is_empty(), diff.is_empty()) {
        (true, _) => diff.to_string(),
        (_, true) => sect.to_string(),
        _ => format!("{sect} {diff}"),
    }
}

fn similarity(a: &str, b: &str) -> f64 {
    // normalized_levenshtein reports 1.0 for two empty strings; an empty
    // side must not count as a perfect match here.
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b)
}

// ═══════════════════════════════════════════════════════════
// SymptomMatcher
// ═══════════════════════════════════════════════════════════

/// Matches free-text symptom reports against the catalog.
pub struct SymptomMatcher {
    /// (normalized entry text, owning canonical condition name)
    entries: Vec<(String, String)>,
    threshold: u8,
}

impl SymptomMatcher {
    pub fn new(catalog: &CatalogStore) -> Self {
        Self::with_threshold(catalog, config::MATCH_THRESHOLD)
    }

    pub fn with_threshold(catalog: &CatalogStore, threshold: u8) -> Self {
        let mut entries = Vec::new();
        for (name, entry) in catalog.conditions() {
            entries.push((normalize(name), name.to_string()));
            for symptom in &entry.symptoms {
                entries.push((normalize(symptom), name.to_string()));
            }
        }
        Self { entries, threshold }
    }

    /// Match free text against all catalog entries. Returns the owning
    /// conditions of every entry scoring at or above the threshold,
    /// deduplicated. Empty input yields an empty set.
    pub fn match_symptoms(&self, text: &str) -> BTreeSet<String> {
        let input = normalize(text);
        let mut matched = BTreeSet::new();
        for (entry_text, condition) in &self.entries {
            if token_set_ratio(entry_text, &input) >= self.threshold {
                matched.insert(condition.clone());
            }
        }
        tracing::debug!(matched = matched.len(), "Symptom match complete");
        matched
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;

    // ── token_set_ratio ──

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(token_set_ratio("fever and cough", "fever and cough"), 100);
    }

    #[test]
    fn word_order_is_irrelevant() {
        assert_eq!(token_set_ratio("cough and fever", "fever and cough"), 100);
    }

    #[test]
    fn contained_token_set_scores_100() {
        // Entry tokens fully inside the input
        assert_eq!(
            token_set_ratio("headache", "i have a headache and fever"),
            100,
        );
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(token_set_ratio("xyzzyplugh", "headache") < 60);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(token_set_ratio("", "headache"), 0);
        assert_eq!(token_set_ratio("   ", "headache"), 0);
        assert_eq!(token_set_ratio("", ""), 0);
    }

    #[test]
    fn near_miss_spelling_still_scores_high() {
        // One transposition inside a single token
        assert!(token_set_ratio("headache", "haedache") >= 60);
    }

    // ── SymptomMatcher ──

    #[test]
    fn garbage_input_matches_nothing() {
        let catalog = sample_catalog();
        let matcher = SymptomMatcher::new(&catalog);
        assert!(matcher.match_symptoms("xyzzyplugh").is_empty());
    }

    #[test]
    fn exact_condition_name_matches() {
        let catalog = sample_catalog();
        let matcher = SymptomMatcher::new(&catalog);
        let matched = matcher.match_symptoms("migraine");
        assert!(matched.contains("Migraine"));
    }

    #[test]
    fn symptom_phrase_matches_owning_condition() {
        let catalog = sample_catalog();
        let matcher = SymptomMatcher::new(&catalog);
        let matched = matcher.match_symptoms("I have a headache and fever");
        assert!(matched.contains("Migraine"), "headache should map to Migraine");
        assert!(matched.contains("Influenza"), "fever should map to Influenza");
    }

    #[test]
    fn empty_input_is_a_valid_no_match() {
        let catalog = sample_catalog();
        let matcher = SymptomMatcher::new(&catalog);
        assert!(matcher.match_symptoms("").is_empty());
        assert!(matcher.match_symptoms("   ").is_empty());
    }

    #[test]
    fn result_set_is_deduplicated() {
        let catalog = sample_catalog();
        let matcher = SymptomMatcher::new(&catalog);
        // Both the condition name and a symptom of it match; one entry out
        let matched = matcher.match_symptoms("migraine headache nausea");
        assert_eq!(
            matched.iter().filter(|c| c.as_str() == "Migraine").count(),
            1,
        );
    }

    #[test]
    fn threshold_is_honored() {
        let catalog = sample_catalog();
        let strict = SymptomMatcher::with_threshold(&catalog, 100);
        assert!(strict.match_symptoms("haedache").is_empty());

        let lax = SymptomMatcher::with_threshold(&catalog, 60);
        assert!(!lax.match_symptoms("haedache").is_empty());
    }
}
