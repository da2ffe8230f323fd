//! Shared fixtures for unit tests.

use std::collections::HashMap;

use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::models::{ConditionEntry, Doctor, MedicationRecord};

fn med(name: &str, dosage: &str, duration: &str, purpose: &str) -> MedicationRecord {
    MedicationRecord {
        name: name.into(),
        dosage: dosage.into(),
        duration: duration.into(),
        purpose: purpose.into(),
    }
}

fn doctor(name: &str, qualification: &str, specialization: &[&str], contact: &str) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        name: name.into(),
        qualification: qualification.into(),
        specialization: specialization.iter().map(|s| s.to_string()).collect(),
        contact: contact.into(),
        image: None,
    }
}

/// A small but representative catalog: three conditions, four doctors,
/// one medication shared between two conditions (dedup coverage).
pub fn sample_catalog() -> CatalogStore {
    let mut conditions = HashMap::new();
    conditions.insert(
        "Migraine".to_string(),
        ConditionEntry {
            symptoms: vec![
                "headache".into(),
                "nausea".into(),
                "sensitivity to light".into(),
            ],
            medications: vec![
                med("Paracetamol", "500mg", "3 days", "pain relief"),
                med("Sumatriptan", "50mg", "as needed", "migraine attacks"),
            ],
        },
    );
    conditions.insert(
        "Influenza".to_string(),
        ConditionEntry {
            symptoms: vec!["fever".into(), "cough".into(), "body ache".into()],
            medications: vec![
                med("Paracetamol", "650mg", "5 days", "fever reduction"),
                med("Oseltamivir", "75mg", "5 days", "antiviral"),
            ],
        },
    );
    conditions.insert(
        "Allergic Rhinitis".to_string(),
        ConditionEntry {
            symptoms: vec!["sneezing".into(), "runny nose".into(), "itchy eyes".into()],
            medications: vec![med("Cetirizine", "10mg", "7 days", "antihistamine")],
        },
    );

    let doctors = vec![
        doctor(
            "Dr. Asha Menon",
            "MD (Neurology)",
            &["Neurology"],
            "menon@clinic.example",
        ),
        doctor(
            "Dr. Ravi Iyer",
            "MBBS",
            &["General Medicine"],
            "iyer@clinic.example",
        ),
        doctor(
            "Dr. Lena Fischer",
            "MD",
            &["General Medicine", "Infectious Disease"],
            "fischer@clinic.example",
        ),
        doctor(
            "Dr. Tomas Ruiz",
            "MD (Immunology)",
            &["Allergy and Immunology"],
            "ruiz@clinic.example",
        ),
    ];

    let mut specializations = HashMap::new();
    specializations.insert(
        "Migraine".to_string(),
        vec!["Neurology".to_string(), "General Medicine".to_string()],
    );
    specializations.insert(
        "Influenza".to_string(),
        vec!["General Medicine".to_string(), "Infectious Disease".to_string()],
    );
    specializations.insert(
        "Allergic Rhinitis".to_string(),
        vec!["Allergy and Immunology".to_string()],
    );

    CatalogStore::from_parts(conditions, doctors, specializations)
}
