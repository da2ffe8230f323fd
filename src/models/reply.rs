use serde::{Deserialize, Serialize};

use super::doctor::Doctor;
use super::medication::MedicationRecord;
use super::prescription::Prescription;

/// Structured data accompanying a turn reply: what matched and what was
/// assembled from it. Serialized for API callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredPayload {
    pub matched_conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<MedicationRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctors: Option<Vec<Doctor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Prescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl StructuredPayload {
    /// Payload carrying only matched conditions (possibly none).
    pub fn conditions(matched: Vec<String>) -> Self {
        Self {
            matched_conditions: matched,
            ..Self::default()
        }
    }
}

/// One turn's reply: prose for the user plus optional structured data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReply {
    pub reply_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<StructuredPayload>,
    #[serde(default)]
    pub conversation_ended: bool,
}

impl TurnReply {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply_text: reply.into(),
            structured: None,
            conversation_ended: false,
        }
    }

    pub fn with_structured(mut self, structured: StructuredPayload) -> Self {
        self.structured = Some(structured);
        self
    }

    pub fn ended(mut self) -> Self {
        self.conversation_ended = true;
        self
    }
}

/// Snapshot of a session's progress for status queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub active: bool,
    pub stage: String,
    pub has_symptoms: bool,
    /// Doctor flow only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_patient_info: Option<bool>,
}
