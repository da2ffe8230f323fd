//! Conversation state machines and session plumbing.

pub mod doctor;
pub mod patient;
pub mod phrasing;
pub mod smalltalk;
pub mod store;

pub use doctor::DoctorConsultation;
pub use patient::PatientConversation;
pub use store::{SessionStore, SessionStoreError};

use crate::catalog::CatalogStore;
use crate::composer::ResponseComposer;
use crate::matching::SymptomMatcher;

/// Read-only collaborators handed to a state machine for one turn.
pub struct TurnContext<'a> {
    pub catalog: &'a CatalogStore,
    pub matcher: &'a SymptomMatcher,
    pub composer: &'a ResponseComposer,
}
