use serde::{Deserialize, Serialize};

/// Dosage used when the catalog does not specify one.
pub const DEFAULT_DOSAGE: &str = "As directed";

fn default_dosage() -> String {
    DEFAULT_DOSAGE.to_string()
}

/// One medication suggestion attached to a catalog condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_dosage")]
    pub dosage: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub purpose: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dosage_defaults_to_as_directed() {
        let med: MedicationRecord =
            serde_json::from_str(r#"{"name": "Paracetamol"}"#).unwrap();
        assert_eq!(med.name, "Paracetamol");
        assert_eq!(med.dosage, "As directed");
        assert_eq!(med.duration, "");
        assert_eq!(med.purpose, "");
    }

    #[test]
    fn full_record_deserializes() {
        let med: MedicationRecord = serde_json::from_str(
            r#"{"name": "Ibuprofen", "dosage": "400mg", "duration": "5 days", "purpose": "pain relief"}"#,
        )
        .unwrap();
        assert_eq!(med.dosage, "400mg");
        assert_eq!(med.duration, "5 days");
        assert_eq!(med.purpose, "pain relief");
    }
}
