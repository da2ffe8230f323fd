use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::medication::MedicationRecord;
use super::patient::PatientInfo;

/// Structured prescription synthesized at the end of a doctor-flow
/// consultation. Immutable after creation; persistence is the caller's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    /// 8-character uppercase token.
    pub id: String,
    pub date: NaiveDate,
    pub doctor_name: String,
    pub patient_info: PatientInfo,
    /// Comma-joined matched condition names.
    pub diagnosis: String,
    pub medications: Vec<MedicationRecord>,
    pub instructions: String,
    pub follow_up: String,
    pub notes: String,
}

impl Prescription {
    /// Generate a fresh prescription token: first 8 hex chars of a v4
    /// UUID, uppercased.
    pub fn new_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_uppercase()
    }
}
