//! Clinician-facing consultation flow.
//!
//! A command layer (help > exit > restart) runs before stage logic on
//! every turn; command words are fixed lowercase literals matched
//! exactly against the normalized input. The staged flow collects
//! patient info and symptoms, then synthesizes an assessment and a
//! structured prescription.

use chrono::Local;

use crate::extract;
use crate::matching::normalize;
use crate::medications;
use crate::models::enums::ConsultationStage;
use crate::models::{PatientInfo, Prescription, SessionStatus, StructuredPayload, TurnReply};

use super::phrasing::VariantPicker;
use super::TurnContext;

/// Signing name on synthesized prescriptions.
pub const DOCTOR_NAME: &str = "Dr. HealthMate AI";

const HELP_WORDS: &[&str] = &["help", "commands", "what can you do", "options"];
const EXIT_WORDS: &[&str] = &["exit", "quit", "stop", "bye", "goodbye", "end", "close"];
const RESTART_WORDS: &[&str] = &["restart", "new", "start over", "begin again", "reset"];

const GREETINGS: &[&str] = &[
    "Hello! I'm Dr. HealthMate AI. Please provide patient information (name, age) and symptoms.",
    "Welcome! I'm Dr. HealthMate AI. What patient information and symptoms can you share?",
    "Good day! I'm Dr. HealthMate AI. Please provide patient details and their symptoms.",
];

const EXIT_REPLIES: &[&str] = &[
    "Consultation ended. Thank you for using Dr. HealthMate AI!",
    "Session complete. Dr. HealthMate AI is always available for medical consultations.",
    "Consultation finished. Take care and stay healthy!",
];

const RESTART_REPLIES: &[&str] = &[
    "New consultation started! Hello, I'm Dr. HealthMate AI. Please provide patient information.",
    "Fresh consultation! I'm Dr. HealthMate AI. What patient information can you provide?",
    "Ready for new consultation! I'm Dr. HealthMate AI. Please share patient details.",
];

const HELP_TEXT: &str = "**Dr. HealthMate AI Commands:**

**Conversation Commands:**
- `help` - Show this help message
- `restart` or `new` - Start a new consultation
- `exit`, `quit`, or `stop` - End the consultation

**How to use Dr. HealthMate AI:**
1. Provide patient information (name, age)
2. Describe the patient's symptoms
3. Get AI-powered medical assessment
4. Generate downloadable prescription
5. Provide follow-up instructions

**Example:** \"Patient John, 35 years old, complaining of headache and fever\"

Type patient information to start a consultation!";

/// One clinician's in-progress consultation.
pub struct DoctorConsultation {
    stage: ConsultationStage,
    patient_info: PatientInfo,
    symptoms: String,
    matched_conditions: Vec<String>,
    conversation_active: bool,
    picker: VariantPicker,
}

impl Default for DoctorConsultation {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorConsultation {
    pub fn new() -> Self {
        Self::with_picker(VariantPicker::new())
    }

    /// Deterministic phrasing for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_picker(VariantPicker::seeded(seed))
    }

    fn with_picker(picker: VariantPicker) -> Self {
        Self {
            stage: ConsultationStage::Greeting,
            patient_info: PatientInfo::default(),
            symptoms: String::new(),
            matched_conditions: Vec::new(),
            conversation_active: true,
            picker,
        }
    }

    /// Clear all session fields and return to the greeting stage.
    pub fn reset_conversation(&mut self) {
        self.stage = ConsultationStage::Greeting;
        self.patient_info = PatientInfo::default();
        self.symptoms.clear();
        self.matched_conditions.clear();
        self.conversation_active = true;
    }

    pub fn stage(&self) -> ConsultationStage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.conversation_active
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            active: self.conversation_active,
            stage: self.stage.as_str().to_string(),
            has_symptoms: !self.symptoms.is_empty(),
            has_patient_info: Some(!self.patient_info.is_empty()),
        }
    }

    /// Advance the consultation by one turn. Commands run first, in
    /// help > exit > restart precedence.
    pub fn process(&mut self, input: &str, ctx: &TurnContext<'_>) -> TurnReply {
        let text = normalize(input);
        tracing::debug!(stage = self.stage.as_str(), "Processing consultation turn");

        if HELP_WORDS.contains(&text.as_str()) {
            return TurnReply::text(HELP_TEXT);
        }
        if EXIT_WORDS.contains(&text.as_str()) {
            self.conversation_active = false;
            return TurnReply::text(self.picker.pick(EXIT_REPLIES)).ended();
        }
        if RESTART_WORDS.contains(&text.as_str()) {
            self.reset_conversation();
            return TurnReply::text(self.picker.pick(RESTART_REPLIES));
        }

        match self.stage {
            ConsultationStage::Greeting => {
                self.stage = ConsultationStage::CollectPatientInfo;
                TurnReply::text(self.picker.pick(GREETINGS))
            }

            ConsultationStage::CollectPatientInfo => self.assess(input, &text, ctx),

            ConsultationStage::ProvideAssessment => TurnReply::text(
                "I didn't quite get that. Can you rephrase? Type 'help' to see available commands.",
            ),
        }
    }

    /// Extract patient info, match symptoms, and synthesize the
    /// assessment plus prescription. No match leaves the stage unchanged
    /// and asks for more detail.
    fn assess(&mut self, raw: &str, text: &str, ctx: &TurnContext<'_>) -> TurnReply {
        self.symptoms = text.to_string();
        // Extraction sees the raw input: the name heuristic needs casing.
        self.patient_info.merge(extract::extract_patient_info(raw));

        let matched = ctx.matcher.match_symptoms(text);
        if matched.is_empty() {
            return TurnReply::text(
                "I couldn't clearly identify a specific condition from the symptoms. Could you provide more detailed symptom information?",
            )
            .with_structured(StructuredPayload::conditions(Vec::new()));
        }
        self.matched_conditions = matched.into_iter().collect();
        self.stage = ConsultationStage::ProvideAssessment;

        let aggregated = medications::aggregate_for_conditions(
            ctx.catalog,
            self.matched_conditions.iter().map(String::as_str),
        );
        let deduped = medications::dedupe(&aggregated);
        let diagnosis = self.matched_conditions.join(", ");

        let assessment = ctx.composer.doctor_assessment(
            &self.symptoms,
            &self.matched_conditions,
            &self.patient_info,
            &deduped,
        );

        let prescription = Prescription {
            id: Prescription::new_id(),
            date: Local::now().date_naive(),
            doctor_name: DOCTOR_NAME.to_string(),
            patient_info: self.patient_info.clone(),
            diagnosis: diagnosis.clone(),
            medications: deduped.clone(),
            instructions: ctx.composer.medication_instructions(&deduped),
            follow_up: ctx.composer.follow_up_instructions(&diagnosis),
            notes: ctx.composer.prescription_notes(&self.patient_info, &diagnosis),
        };
        tracing::info!(id = %prescription.id, %diagnosis, "Prescription synthesized");

        let reply = format!(
            "{assessment}\n\n\
             **Prescription Generated!**\n\
             A downloadable prescription has been created for this patient.\n\n\
             What would you like to do next?\n\
             - Type 'restart' to start a new consultation\n\
             - Type 'help' to see available commands\n\
             - Type 'exit' to end the consultation",
        );

        TurnReply::text(reply).with_structured(StructuredPayload {
            matched_conditions: self.matched_conditions.clone(),
            medications: Some(deduped),
            prescription: Some(prescription),
            ..StructuredPayload::default()
        })
    }
}
