use serde::{Deserialize, Serialize};

/// Best-effort patient identity captured during a doctor consultation.
/// Either field may be absent; extraction is never guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

impl PatientInfo {
    /// True when neither field has been captured.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    /// Fill unset fields from another extraction pass. Set fields win.
    pub fn merge(&mut self, other: PatientInfo) {
        if self.name.is_none() {
            self.name = other.name;
        }
        if self.age.is_none() {
            self.age = other.age;
        }
    }

    /// One-line summary for prompt construction.
    pub fn summary(&self) -> String {
        format!(
            "Patient: {}, Age: {}",
            self.name.as_deref().unwrap_or("Unknown"),
            self.age.as_deref().unwrap_or("Not specified"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_info_summary_uses_placeholders() {
        let info = PatientInfo::default();
        assert!(info.is_empty());
        assert_eq!(info.summary(), "Patient: Unknown, Age: Not specified");
    }

    #[test]
    fn merge_fills_only_unset_fields() {
        let mut info = PatientInfo {
            name: Some("John".into()),
            age: None,
        };
        info.merge(PatientInfo {
            name: Some("Jane".into()),
            age: Some("35".into()),
        });
        assert_eq!(info.name.as_deref(), Some("John"));
        assert_eq!(info.age.as_deref(), Some("35"));
    }

    #[test]
    fn full_info_summary() {
        let info = PatientInfo {
            name: Some("John".into()),
            age: Some("35".into()),
        };
        assert!(!info.is_empty());
        assert_eq!(info.summary(), "Patient: John, Age: 35");
    }
}
