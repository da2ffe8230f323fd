//! Best-effort patient info extraction from free text.
//!
//! Deliberately lightweight: a missed name or age leaves the field unset
//! and never blocks the consultation flow.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::PatientInfo;

fn age_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(\d{1,3})\s+(?:years?|old)\b").expect("valid age pattern")
    })
}

/// Scrape a name and age from free text.
///
/// Age: a number directly followed by "years"/"old". Name: the first
/// word when it starts with an uppercase letter, trailing punctuation
/// stripped. Both heuristics are fallible by design.
pub fn extract_patient_info(text: &str) -> PatientInfo {
    let age = age_pattern()
        .captures(text)
        .map(|caps| caps[1].to_string());

    let name = text
        .split_whitespace()
        .next()
        .map(|word| word.trim_end_matches([',', '.', ';', ':']))
        .filter(|word| word.chars().next().is_some_and(|c| c.is_uppercase()))
        .map(|word| word.to_string());

    PatientInfo { name, age }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_name_and_age() {
        let info = extract_patient_info("John, 35 years old, complaining of headache");
        assert_eq!(info.name.as_deref(), Some("John"));
        assert_eq!(info.age.as_deref(), Some("35"));
    }

    #[test]
    fn age_with_old_keyword() {
        let info = extract_patient_info("Maria 42 old with a cough");
        assert_eq!(info.age.as_deref(), Some("42"));
    }

    #[test]
    fn lowercase_first_word_yields_no_name() {
        let info = extract_patient_info("patient reports fever for 3 days");
        assert!(info.name.is_none());
    }

    #[test]
    fn plain_number_is_not_an_age() {
        // "3 days" must not be read as an age
        let info = extract_patient_info("Fever for 3 days");
        assert!(info.age.is_none());
    }

    #[test]
    fn empty_text_extracts_nothing() {
        let info = extract_patient_info("");
        assert!(info.is_empty());
    }

    #[test]
    fn extraction_never_blocks_on_odd_input() {
        let info = extract_patient_info("!!! 9999999 years ???");
        // Too many digits for the age pattern; no capitalized first word
        assert!(info.age.is_none());
        assert!(info.name.is_none());
    }
}
