//! Static reference tables: condition catalog, doctor directory, and the
//! condition → specialization map.
//!
//! All three are loaded once at startup and are read-only afterwards.
//! A missing or malformed table is fatal — the assistant cannot serve
//! without its reference data. Condition lookups are case-insensitive.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config;
use crate::models::{ConditionEntry, Doctor, MedicationRecord};

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Errors from catalog loading. All variants are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot read catalog file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed catalog file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ═══════════════════════════════════════════════════════════
// CatalogStore
// ═══════════════════════════════════════════════════════════

/// Read-only view over the three reference tables.
#[derive(Debug)]
pub struct CatalogStore {
    /// Canonical condition name → entry.
    conditions: HashMap<String, ConditionEntry>,
    /// Lowercased condition name → canonical name.
    condition_index: HashMap<String, String>,
    doctors: Vec<Doctor>,
    /// Lowercased condition name → specialization tags.
    specializations: HashMap<String, Vec<String>>,
}

impl CatalogStore {
    /// Load all three tables from `dir`. Fails on the first missing or
    /// malformed file.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let conditions: HashMap<String, ConditionEntry> =
            read_table(&dir.join(config::CONDITIONS_FILE))?;
        let doctors: Vec<Doctor> = read_table(&dir.join(config::DOCTORS_FILE))?;
        let specializations: HashMap<String, Vec<String>> =
            read_table(&dir.join(config::SPECIALIZATIONS_FILE))?;

        let store = Self::from_parts(conditions, doctors, specializations);
        tracing::info!(
            conditions = store.conditions.len(),
            doctors = store.doctors.len(),
            "Catalog loaded",
        );
        Ok(store)
    }

    /// Build a store from already-deserialized tables. Used by tests and
    /// embedders that source reference data elsewhere.
    pub fn from_parts(
        conditions: HashMap<String, ConditionEntry>,
        doctors: Vec<Doctor>,
        specializations: HashMap<String, Vec<String>>,
    ) -> Self {
        let condition_index = conditions
            .keys()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();
        let specializations = specializations
            .into_iter()
            .map(|(name, tags)| (name.to_lowercase(), tags))
            .collect();
        Self {
            conditions,
            condition_index,
            doctors,
            specializations,
        }
    }

    // ── Condition lookups (case-insensitive) ────────────────

    /// Look up a condition entry by name, any casing.
    pub fn condition(&self, name: &str) -> Option<&ConditionEntry> {
        let canonical = self.condition_index.get(&name.to_lowercase())?;
        self.conditions.get(canonical)
    }

    /// Canonical name for a condition, any casing.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.condition_index
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Iterate all conditions as (canonical name, entry).
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &ConditionEntry)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Medications configured for a condition. Empty for unknown names.
    pub fn medications_for(&self, name: &str) -> &[MedicationRecord] {
        self.condition(name)
            .map(|entry| entry.medications.as_slice())
            .unwrap_or(&[])
    }

    /// Specialization tags for a condition. Empty for unmapped names.
    pub fn specializations_for(&self, name: &str) -> &[String] {
        self.specializations
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ── Doctor directory ────────────────────────────────────

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_catalog;
    use std::fs;

    fn write_valid_tables(dir: &Path) {
        fs::write(
            dir.join(config::CONDITIONS_FILE),
            r#"{"Migraine": {"symptoms": ["headache", "nausea"], "medications": [{"name": "Paracetamol"}]}}"#,
        )
        .unwrap();
        fs::write(
            dir.join(config::DOCTORS_FILE),
            r#"[{"name": "Dr. Menon", "qualification": "MD", "specialization": ["Neurology"], "contact": "menon@clinic.example"}]"#,
        )
        .unwrap();
        fs::write(
            dir.join(config::SPECIALIZATIONS_FILE),
            r#"{"Migraine": ["Neurology"]}"#,
        )
        .unwrap();
    }

    #[test]
    fn load_reads_all_three_tables() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_tables(dir.path());

        let store = CatalogStore::load(dir.path()).unwrap();
        assert_eq!(store.condition_count(), 1);
        assert_eq!(store.doctors().len(), 1);
        assert_eq!(store.specializations_for("Migraine"), ["Neurology"]);
        // Serde default filled the missing dosage
        assert_eq!(store.medications_for("Migraine")[0].dosage, "As directed");
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // No files written
        let err = CatalogStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Unreadable { .. }));
    }

    #[test]
    fn malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_tables(dir.path());
        fs::write(dir.path().join(config::CONDITIONS_FILE), "not json").unwrap();

        let err = CatalogStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn condition_lookup_is_case_insensitive() {
        let store = sample_catalog();
        assert!(store.condition("migraine").is_some());
        assert!(store.condition("MIGRAINE").is_some());
        assert_eq!(store.canonical_name("mIgRaInE"), Some("Migraine"));
        assert!(store.condition("gout").is_none());
    }

    #[test]
    fn unknown_condition_yields_empty_slices() {
        let store = sample_catalog();
        assert!(store.medications_for("Gout").is_empty());
        assert!(store.specializations_for("Gout").is_empty());
    }

    #[test]
    fn specialization_lookup_is_case_insensitive() {
        let store = sample_catalog();
        assert!(!store.specializations_for("influenza").is_empty());
        assert!(!store.specializations_for("Influenza").is_empty());
    }
}
