use serde::{Deserialize, Serialize};

use super::medication::MedicationRecord;

/// One catalog condition: the symptoms that suggest it and the
/// medications configured for it. Immutable after load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionEntry {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub medications: Vec<MedicationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_entry_deserializes_with_defaults() {
        let entry: ConditionEntry = serde_json::from_str(r#"{}"#).unwrap();
        assert!(entry.symptoms.is_empty());
        assert!(entry.medications.is_empty());
    }

    #[test]
    fn entry_with_symptoms_and_medications() {
        let entry: ConditionEntry = serde_json::from_str(
            r#"{"symptoms": ["headache", "nausea"], "medications": [{"name": "Paracetamol"}]}"#,
        )
        .unwrap();
        assert_eq!(entry.symptoms.len(), 2);
        assert_eq!(entry.medications[0].dosage, "As directed");
    }
}
