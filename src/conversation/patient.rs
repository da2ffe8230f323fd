//! Patient intake flow: a strictly linear six-stage state machine with a
//! terminal yes/no branch.

use crate::composer::IntakeSummary;
use crate::config;
use crate::matching::normalize;
use crate::medications;
use crate::models::enums::Stage;
use crate::models::{SessionStatus, StructuredPayload, TurnReply};
use crate::referral;

use super::phrasing::VariantPicker;
use super::TurnContext;

const GREETINGS: &[&str] = &[
    "Hello! I'm HealthMate. How are you feeling today?",
    "Hi there, I'm HealthMate. Tell me what symptoms are bothering you.",
    "Hey! I'm here to help. Could you share your symptoms with me?",
];

// "{symptoms}" is replaced with the user's report.
const SYMPTOM_ACKS: &[&str] = &[
    "Sorry to hear you're dealing with {symptoms}. Can I ask, how many days has this been going on?",
    "Got it. You mentioned {symptoms}. Since when are you feeling this way?",
    "Thanks for sharing. To understand better, how long have you had these symptoms?",
];

const DURATION_ACKS: &[&str] = &[
    "Okay, noted. Do you have any other symptoms along with this?",
    "Thanks. Are you noticing anything else unusual in your health?",
    "Got it. Apart from this, any other symptoms?",
];

const OTHER_ACKS: &[&str] = &[
    "Thanks for telling me. Do you have any allergies or dietary concerns?",
    "Okay. Just to be safe, do you have any known allergies?",
    "Got it. Do you have any allergies to medicines or food?",
];

const NO_MATCH_REPLIES: &[&str] = &[
    "Hmm, I couldn't clearly match your symptoms. It might be best to check with a doctor.",
    "Sorry, I don't have enough info to suggest medicines safely. Please consult a doctor.",
];

const CLOSINGS: &[&str] = &[
    "Alright, please rest and take care. Let me know if you need more help.",
    "Okay. Stay safe and get well soon.",
    "No problem. I'm here if you want advice later.",
];

/// One patient's in-progress intake conversation.
pub struct PatientConversation {
    stage: Stage,
    symptoms: String,
    duration: String,
    other_symptoms: String,
    allergies: String,
    /// Computed once at the symptom stage, reused downstream. Only the
    /// matcher ever writes this.
    matched_conditions: Vec<String>,
    active: bool,
    picker: VariantPicker,
}

impl Default for PatientConversation {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientConversation {
    pub fn new() -> Self {
        Self::with_picker(VariantPicker::new())
    }

    /// Deterministic phrasing for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_picker(VariantPicker::seeded(seed))
    }

    fn with_picker(picker: VariantPicker) -> Self {
        Self {
            stage: Stage::Greeting,
            symptoms: String::new(),
            duration: String::new(),
            other_symptoms: String::new(),
            allergies: String::new(),
            matched_conditions: Vec::new(),
            active: true,
            picker,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            active: self.active,
            stage: self.stage.as_str().to_string(),
            has_symptoms: !self.symptoms.is_empty(),
            has_patient_info: None,
        }
    }

    /// Advance the conversation by one turn.
    pub fn process(&mut self, input: &str, ctx: &TurnContext<'_>) -> TurnReply {
        let text = normalize(input);
        tracing::debug!(stage = self.stage.as_str(), "Processing patient turn");

        match self.stage {
            // Input ignored: the first message only triggers the greeting.
            Stage::Greeting => {
                self.stage = Stage::AskSymptoms;
                TurnReply::text(self.picker.pick(GREETINGS))
            }

            Stage::AskSymptoms => {
                self.symptoms = text.clone();
                self.matched_conditions =
                    ctx.matcher.match_symptoms(&text).into_iter().collect();
                self.stage = Stage::AskDuration;
                let ack = self.picker.pick(SYMPTOM_ACKS).replace("{symptoms}", &text);
                TurnReply::text(ack)
            }

            Stage::AskDuration => {
                self.duration = text;
                self.stage = Stage::AskOther;
                TurnReply::text(self.picker.pick(DURATION_ACKS))
            }

            Stage::AskOther => {
                self.other_symptoms = text;
                self.stage = Stage::AskAllergies;
                TurnReply::text(self.picker.pick(OTHER_ACKS))
            }

            Stage::AskAllergies => {
                self.allergies = text;
                self.stage = Stage::GiveAdvice;

                if self.matched_conditions.is_empty() {
                    return TurnReply::text(self.picker.pick(NO_MATCH_REPLIES))
                        .with_structured(StructuredPayload::conditions(Vec::new()));
                }

                let aggregated = medications::aggregate_for_conditions(
                    ctx.catalog,
                    self.matched_conditions.iter().map(String::as_str),
                );
                let deduped = medications::dedupe(&aggregated);

                let advice = ctx.composer.patient_advice(&IntakeSummary {
                    symptoms: &self.symptoms,
                    duration: &self.duration,
                    other_symptoms: &self.other_symptoms,
                    allergies: &self.allergies,
                    medications: &deduped,
                });

                let reply = format!(
                    "{advice}\n\nWould you like me to also suggest some doctors you can consult? (yes/no)",
                );
                TurnReply::text(reply).with_structured(StructuredPayload {
                    matched_conditions: self.matched_conditions.clone(),
                    medications: Some(deduped),
                    ..StructuredPayload::default()
                })
            }

            Stage::GiveAdvice => match text.as_str() {
                "yes" | "y" => {
                    self.active = false;
                    let doctors = referral::match_doctors(
                        ctx.catalog,
                        self.matched_conditions.iter().map(String::as_str),
                        config::MAX_DOCTORS,
                    );
                    if doctors.is_empty() {
                        return TurnReply::text(
                            "Sorry, I couldn't find doctors for your case right now.",
                        )
                        .ended();
                    }
                    TurnReply::text(referral::render_doctor_list(&doctors))
                        .with_structured(StructuredPayload {
                            matched_conditions: self.matched_conditions.clone(),
                            doctors: Some(doctors),
                            ..StructuredPayload::default()
                        })
                        .ended()
                }
                "no" | "n" => {
                    self.active = false;
                    TurnReply::text(self.picker.pick(CLOSINGS)).ended()
                }
                _ => TurnReply::text("Please reply with 'yes' or 'no'."),
            },
        }
    }
}
