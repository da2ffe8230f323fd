pub mod condition;
pub mod doctor;
pub mod enums;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod reply;

pub use condition::ConditionEntry;
pub use doctor::Doctor;
pub use medication::{MedicationRecord, DEFAULT_DOSAGE};
pub use patient::PatientInfo;
pub use prescription::Prescription;
pub use reply::{SessionStatus, StructuredPayload, TurnReply};
