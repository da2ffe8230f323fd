//! Per-turn orchestration: owns the catalog, the matcher, the composer,
//! and the two session stores, and exposes the request/reply contract.
//!
//! One engine instance is shared (via `Arc`) by whatever transport
//! embeds it; each turn runs synchronously to completion. Sessions that
//! reach a terminal reply are evicted immediately; idle ones are evicted
//! on demand through `evict_idle`.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::CatalogStore;
use crate::composer::{IntakeSummary, ResponseComposer};
use crate::config;
use crate::conversation::smalltalk;
use crate::conversation::store::{SessionStore, SessionStoreError};
use crate::conversation::{DoctorConsultation, PatientConversation, TurnContext};
use crate::generation::TextGenerator;
use crate::matching::SymptomMatcher;
use crate::medications;
use crate::models::enums::{ConsultationStage, Stage};
use crate::models::{PatientInfo, Prescription, SessionStatus, StructuredPayload, TurnReply};
use crate::referral;

/// Errors from engine plumbing. Turn-level failures (no match, failed
/// generation) are not errors — they become replies.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// The conversational core behind the request/reply contract.
pub struct ChatEngine {
    catalog: Arc<CatalogStore>,
    matcher: SymptomMatcher,
    composer: ResponseComposer,
    patients: SessionStore<PatientConversation>,
    consultations: SessionStore<DoctorConsultation>,
}

impl ChatEngine {
    pub fn new(catalog: Arc<CatalogStore>, generator: Arc<dyn TextGenerator>) -> Self {
        let matcher = SymptomMatcher::new(&catalog);
        Self {
            catalog,
            matcher,
            composer: ResponseComposer::new(generator),
            patients: SessionStore::new(),
            consultations: SessionStore::new(),
        }
    }

    fn ctx(&self) -> TurnContext<'_> {
        TurnContext {
            catalog: &self.catalog,
            matcher: &self.matcher,
            composer: &self.composer,
        }
    }

    // ── Patient flow ────────────────────────────────────────

    /// Process one patient-flow turn. Creates the session on first
    /// message; evicts it when the conversation ends.
    pub fn patient_turn(&self, session_id: &str, message: &str) -> Result<TurnReply, EngineError> {
        let ctx = self.ctx();
        let reply = self
            .patients
            .with_session(session_id, |session| session.process(message, &ctx))?;
        if reply.conversation_ended {
            self.patients.remove(session_id)?;
            tracing::debug!(session_id, "Patient session ended and evicted");
        }
        Ok(reply)
    }

    pub fn patient_status(&self, session_id: &str) -> Result<SessionStatus, EngineError> {
        let status = self
            .patients
            .with_existing(session_id, |session| session.status())?;
        Ok(status.unwrap_or(SessionStatus {
            active: false,
            stage: Stage::Greeting.as_str().to_string(),
            has_symptoms: false,
            has_patient_info: None,
        }))
    }

    /// Reset a patient session to its initial stage. A no-op on unknown
    /// session ids.
    pub fn reset_patient(&self, session_id: &str) -> Result<TurnReply, EngineError> {
        let existed = self
            .patients
            .with_existing(session_id, |session| *session = PatientConversation::new())?
            .is_some();
        Ok(reset_reply(existed))
    }

    // ── Doctor flow ─────────────────────────────────────────

    /// Process one doctor-flow turn. Creates the session on first
    /// message; evicts it on the exit command.
    pub fn doctor_turn(&self, session_id: &str, message: &str) -> Result<TurnReply, EngineError> {
        let ctx = self.ctx();
        let reply = self
            .consultations
            .with_session(session_id, |session| session.process(message, &ctx))?;
        if reply.conversation_ended {
            self.consultations.remove(session_id)?;
            tracing::debug!(session_id, "Consultation ended and evicted");
        }
        Ok(reply)
    }

    pub fn doctor_status(&self, session_id: &str) -> Result<SessionStatus, EngineError> {
        let status = self
            .consultations
            .with_existing(session_id, |session| session.status())?;
        Ok(status.unwrap_or(SessionStatus {
            active: false,
            stage: ConsultationStage::Greeting.as_str().to_string(),
            has_symptoms: false,
            has_patient_info: Some(false),
        }))
    }

    /// Reset a doctor session. A no-op on unknown session ids.
    pub fn reset_doctor(&self, session_id: &str) -> Result<TurnReply, EngineError> {
        let existed = self
            .consultations
            .with_existing(session_id, |session| session.reset_conversation())?
            .is_some();
        Ok(reset_reply(existed))
    }

    // ── Maintenance ─────────────────────────────────────────

    /// Evict sessions idle longer than `max_idle` from both stores.
    pub fn evict_idle(&self, max_idle: Duration) -> Result<usize, EngineError> {
        let evicted =
            self.patients.evict_idle(max_idle)? + self.consultations.evict_idle(max_idle)?;
        if evicted > 0 {
            tracing::info!(evicted, "Idle sessions evicted");
        }
        Ok(evicted)
    }

    // ── Single-shot helpers (stateless) ─────────────────────

    /// One-turn assessment without a session: match, aggregate, compose,
    /// optionally attach doctors. Smalltalk short-circuits.
    pub fn assess_once(
        &self,
        text: &str,
        duration: Option<&str>,
        other_symptoms: Option<&str>,
        allergies: Option<&str>,
        want_doctors: bool,
    ) -> TurnReply {
        if let Some(reply) = smalltalk::patient_smalltalk(text) {
            return TurnReply::text(reply)
                .with_structured(StructuredPayload::conditions(Vec::new()));
        }

        let matched: Vec<String> = self.matcher.match_symptoms(text).into_iter().collect();
        if matched.is_empty() {
            return TurnReply::text(
                "Sorry, I couldn't find a recommended medicine. Please consult a doctor.",
            )
            .with_structured(StructuredPayload::conditions(Vec::new()));
        }

        let aggregated = medications::aggregate_for_conditions(
            &self.catalog,
            matched.iter().map(String::as_str),
        );
        let deduped = medications::dedupe(&aggregated);

        let advice = self.composer.patient_advice(&IntakeSummary {
            symptoms: text,
            duration: duration.unwrap_or(""),
            other_symptoms: other_symptoms.unwrap_or(""),
            allergies: allergies.unwrap_or(""),
            medications: &deduped,
        });

        let doctors = want_doctors.then(|| {
            referral::match_doctors(
                &self.catalog,
                matched.iter().map(String::as_str),
                config::MAX_DOCTORS,
            )
        });

        let summary = format!(
            "{} — reported for {}",
            matched.join(", "),
            duration.filter(|d| !d.trim().is_empty()).unwrap_or("N/A"),
        );

        TurnReply::text(advice).with_structured(StructuredPayload {
            matched_conditions: matched,
            medications: Some(deduped),
            doctors,
            summary: Some(summary),
            ..StructuredPayload::default()
        })
    }

    /// One-turn doctor consultation without a session: assessment plus
    /// prescription in a single reply. Smalltalk short-circuits.
    pub fn consult_once(&self, text: &str, patient_info: Option<PatientInfo>) -> TurnReply {
        if let Some(reply) = smalltalk::doctor_smalltalk(text) {
            return TurnReply::text(reply)
                .with_structured(StructuredPayload::conditions(Vec::new()));
        }

        let matched: Vec<String> = self.matcher.match_symptoms(text).into_iter().collect();
        if matched.is_empty() {
            return TurnReply::text(
                "I couldn't identify a specific condition. Please provide more detailed symptom information.",
            )
            .with_structured(StructuredPayload::conditions(Vec::new()));
        }

        let patient_info = patient_info.unwrap_or_default();
        let aggregated = medications::aggregate_for_conditions(
            &self.catalog,
            matched.iter().map(String::as_str),
        );
        let deduped = medications::dedupe(&aggregated);
        let diagnosis = matched.join(", ");

        let assessment =
            self.composer
                .doctor_assessment(text, &matched, &patient_info, &deduped);

        let prescription = Prescription {
            id: Prescription::new_id(),
            date: chrono::Local::now().date_naive(),
            doctor_name: crate::conversation::doctor::DOCTOR_NAME.to_string(),
            patient_info: patient_info.clone(),
            diagnosis: diagnosis.clone(),
            medications: deduped.clone(),
            instructions: self.composer.medication_instructions(&deduped),
            follow_up: self.composer.follow_up_instructions(&diagnosis),
            notes: self.composer.prescription_notes(&patient_info, &diagnosis),
        };

        TurnReply::text(assessment).with_structured(StructuredPayload {
            matched_conditions: matched,
            medications: Some(deduped),
            prescription: Some(prescription),
            ..StructuredPayload::default()
        })
    }
}

fn reset_reply(existed: bool) -> TurnReply {
    if existed {
        TurnReply::text("Conversation reset. Send a message to start again.")
    } else {
        TurnReply::text("There's no active conversation to reset.")
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
