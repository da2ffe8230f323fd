//! Medication aggregation and deduplication for matched conditions.

use std::collections::HashSet;

use crate::catalog::CatalogStore;
use crate::models::{MedicationRecord, DEFAULT_DOSAGE};

/// Concatenate the configured medication lists of each condition, in
/// caller-supplied condition order. Unknown conditions contribute nothing.
pub fn aggregate_for_conditions<'a, I>(catalog: &CatalogStore, conditions: I) -> Vec<MedicationRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut meds = Vec::new();
    for condition in conditions {
        meds.extend_from_slice(catalog.medications_for(condition));
    }
    meds
}

/// Deduplicate by lowercased trimmed name; first occurrence wins and
/// output keeps first-seen order. Entries with an empty name are dropped
/// silently. Every returned entry has a non-empty dosage (defaulted to
/// "As directed").
pub fn dedupe(meds: &[MedicationRecord]) -> Vec<MedicationRecord> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for med in meds {
        let key = med.name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        if seen.insert(key) {
            let mut record = med.clone();
            if record.dosage.trim().is_empty() {
                record.dosage = DEFAULT_DOSAGE.to_string();
            }
            out.push(record);
        }
    }
    out
}
