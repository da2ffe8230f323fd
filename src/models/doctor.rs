use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directory entry for a referrable doctor. Immutable reference data.
///
/// `id` is the dedup identity. Directory files that predate the id field
/// get a generated one at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub qualification: String,
    #[serde(default)]
    pub specialization: Vec<String>,
    pub contact: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_without_id_gets_generated_one() {
        let a: Doctor = serde_json::from_str(
            r#"{"name": "Dr. Menon", "qualification": "MBBS", "specialization": ["General Medicine"], "contact": "menon@clinic.example"}"#,
        )
        .unwrap();
        let b: Doctor = serde_json::from_str(
            r#"{"name": "Dr. Menon", "qualification": "MBBS", "specialization": ["General Medicine"], "contact": "menon@clinic.example"}"#,
        )
        .unwrap();
        assert_ne!(a.id, b.id, "Generated ids must be distinct");
        assert!(a.image.is_none());
    }

    #[test]
    fn doctor_with_explicit_id_keeps_it() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{"id": "{id}", "name": "Dr. Rao", "qualification": "MD", "contact": "rao@clinic.example"}}"#,
        );
        let doc: Doctor = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.id, id);
        assert!(doc.specialization.is_empty());
    }
}
