//! Prompt construction and AI response composition.
//!
//! Prompts are deterministic functions of conversation state; the model
//! only ever fills in prose. Generation failures are recoverable: one
//! retry, then a deterministic fallback message. Every patient-facing
//! advice response carries the safety disclaimer verbatim.

use std::sync::Arc;

use crate::generation::{GenerationError, GenerationOptions, TextGenerator};
use crate::models::{MedicationRecord, PatientInfo};

/// Safety disclaimer appended to every patient-facing advice response.
pub const DISCLAIMER: &str = "⚠️ Disclaimer - This chatbot does not provide medical advice. Always consult a doctor before taking or changing any medication.\nIn case of emergency, call your local emergency number.";

/// Deterministic reply when generation fails even after a retry.
pub const FALLBACK_ADVICE: &str =
    "I'm having trouble generating advice right now; please consult a doctor directly.";

const FALLBACK_ASSESSMENT: &str = "The assessment service is unavailable right now. Please review the matched conditions and medication list manually.";
const FALLBACK_INSTRUCTIONS: &str = "Take each medication exactly as directed on the label. Contact a clinician if symptoms worsen or new symptoms appear.";
const FALLBACK_FOLLOW_UP: &str =
    "Schedule a follow-up visit if symptoms persist beyond a few days or worsen.";
const FALLBACK_NOTES: &str =
    "Generated from reported symptoms; to be verified by the attending clinician.";

// System roles, one per generation call site.
const PATIENT_SYSTEM_ROLE: &str = "You are a helpful, safe, conversational medical assistant.";
const DOCTOR_SYSTEM_ROLE: &str = "You are Dr. HealthMate AI, a professional medical assistant. Provide clear, professional medical advice.";
const INSTRUCTIONS_SYSTEM_ROLE: &str =
    "You are a professional doctor providing medication instructions.";
const FOLLOW_UP_SYSTEM_ROLE: &str =
    "You are a professional doctor providing follow-up care instructions.";
const NOTES_SYSTEM_ROLE: &str = "You are a professional doctor writing clinical notes.";

// Output budgets per call site.
const PATIENT_BUDGET: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 600,
};
const ASSESSMENT_BUDGET: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 800,
};
const INSTRUCTIONS_BUDGET: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 300,
};
const FOLLOW_UP_BUDGET: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 250,
};
const NOTES_BUDGET: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 200,
};

// ═══════════════════════════════════════════════════════════
// Prompt building
// ═══════════════════════════════════════════════════════════

/// Accumulated intake answers feeding the patient advice prompt.
pub struct IntakeSummary<'a> {
    pub symptoms: &'a str,
    pub duration: &'a str,
    pub other_symptoms: &'a str,
    pub allergies: &'a str,
    pub medications: &'a [MedicationRecord],
}

fn presentable<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.trim().is_empty() {
        placeholder
    } else {
        text
    }
}

/// Render medications as a bulleted block, or a single placeholder line.
pub fn render_medication_block(medications: &[MedicationRecord]) -> String {
    if medications.is_empty() {
        return "- No medication suggestion available".to_string();
    }
    medications
        .iter()
        .map(|m| {
            let mut line = format!("- {}: {}", m.name, m.dosage);
            if !m.duration.is_empty() {
                line.push_str(&format!(" for {}", m.duration));
            }
            if !m.purpose.is_empty() {
                line.push_str(&format!(" ({})", m.purpose));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the patient-facing advice prompt.
pub fn build_patient_prompt(intake: &IntakeSummary<'_>) -> String {
    let symptoms = presentable(intake.symptoms, "Not specified");
    let duration = presentable(intake.duration, "Not specified");
    let other = presentable(intake.other_symptoms, "None");
    let allergies = presentable(intake.allergies, "None");
    let meds_block = render_medication_block(intake.medications);

    format!(
        "You are HealthMate, a warm, friendly, safety-first medical assistant.\n\
         Assist the patient based on their symptoms: {symptoms}, duration: {duration}, other symptoms: {other}, and allergies: {allergies}.\n\
         Create a plain-text patient-facing response in this structure:\n\
         \n\
         *Summary*\n\
         - Short recap of reported {symptoms}, {duration}, and {other}.\n\
         \n\
         Causes: Possible causes based on {symptoms}.\n\
         \n\
         *What you can do*\n\
         - Give 3-4 simple self-care tips based on symptoms {symptoms}.\n\
         \n\
         Suggested Medication & Dosage:\n\
         {meds_block}",
    )
}

/// Build the clinician-facing assessment prompt.
pub fn build_doctor_prompt(
    symptoms: &str,
    conditions: &[String],
    patient_info: &PatientInfo,
    medications: &[MedicationRecord],
) -> String {
    let meds_block = if medications.is_empty() {
        "- No medication recommendation available".to_string()
    } else {
        render_medication_block(medications)
    };

    format!(
        "You are Dr. HealthMate AI, a professional medical assistant helping doctors provide patient care.\n\
         \n\
         Patient Information: {}\n\
         Reported Symptoms: {symptoms}\n\
         Likely Conditions: {}\n\
         \n\
         Provide a professional medical response in this structure:\n\
         \n\
         **Clinical Assessment:**\n\
         - Brief assessment of the reported symptoms\n\
         - Likely diagnosis based on symptoms\n\
         \n\
         **Treatment Plan:**\n\
         - Recommended medications and dosages\n\
         {meds_block}\n\
         \n\
         **Patient Instructions:**\n\
         - How to take medications\n\
         - Lifestyle recommendations\n\
         - Warning signs to watch for\n\
         \n\
         **Follow-up:**\n\
         - When to return for follow-up\n\
         - Emergency situations requiring immediate care\n\
         \n\
         Always maintain professional medical language and include appropriate disclaimers.",
        patient_info.summary(),
        conditions.join(", "),
    )
}

/// Build the medication instructions prompt for a prescription.
pub fn build_instructions_prompt(medications: &[MedicationRecord]) -> String {
    format!(
        "As a medical professional, provide clear medication instructions for these medications:\n\
         {}\n\
         \n\
         Include:\n\
         - When to take each medication\n\
         - Important warnings or side effects to watch for\n\
         - What to do if symptoms worsen\n\
         - General medication safety tips\n\
         \n\
         Keep instructions clear and professional.",
        render_medication_block(medications),
    )
}

/// Build the follow-up instructions prompt for a prescription.
pub fn build_follow_up_prompt(diagnosis: &str) -> String {
    format!(
        "As a doctor, provide follow-up instructions for a patient diagnosed with: {diagnosis}\n\
         \n\
         Include:\n\
         - When to schedule follow-up appointment\n\
         - Warning signs that require immediate medical attention\n\
         - General health recommendations\n\
         - When to contact the doctor\n\
         \n\
         Keep instructions clear and professional.",
    )
}

/// Build the clinical notes prompt for a prescription.
pub fn build_notes_prompt(patient_info: &PatientInfo, diagnosis: &str) -> String {
    format!(
        "As a doctor, write brief clinical notes for this prescription:\n\
         {}\n\
         Diagnosis: {diagnosis}\n\
         \n\
         Include:\n\
         - Brief clinical assessment\n\
         - Treatment rationale\n\
         - Any special considerations\n\
         \n\
         Keep it professional and concise.",
        patient_info.summary(),
    )
}

// ═══════════════════════════════════════════════════════════
// ResponseComposer
// ═══════════════════════════════════════════════════════════

/// Composes user-facing prose from conversation state via the
/// text-generation capability.
pub struct ResponseComposer {
    generator: Arc<dyn TextGenerator>,
}

impl ResponseComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One retry on failure, then give up. The single external
    /// dependency with meaningful failure probability sits behind this.
    fn generate_with_retry(
        &self,
        system: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        match self.generator.generate(system, prompt, options) {
            Ok(text) => Ok(text),
            Err(first) => {
                tracing::warn!(error = %first, "Generation failed, retrying once");
                self.generator.generate(system, prompt, options)
            }
        }
    }

    /// Patient-facing advice. Always ends with the safety disclaimer,
    /// whether generated or fallback.
    pub fn patient_advice(&self, intake: &IntakeSummary<'_>) -> String {
        let prompt = build_patient_prompt(intake);
        let text = match self.generate_with_retry(PATIENT_SYSTEM_ROLE, &prompt, &PATIENT_BUDGET) {
            Ok(text) => text,
            Err(error) => {
                tracing::error!(%error, "Patient advice generation failed, using fallback");
                FALLBACK_ADVICE.to_string()
            }
        };
        ensure_disclaimer(text)
    }

    /// Clinician-facing assessment for the doctor flow.
    pub fn doctor_assessment(
        &self,
        symptoms: &str,
        conditions: &[String],
        patient_info: &PatientInfo,
        medications: &[MedicationRecord],
    ) -> String {
        let prompt = build_doctor_prompt(symptoms, conditions, patient_info, medications);
        self.generate_with_retry(DOCTOR_SYSTEM_ROLE, &prompt, &ASSESSMENT_BUDGET)
            .unwrap_or_else(|error| {
                tracing::error!(%error, "Assessment generation failed, using fallback");
                FALLBACK_ASSESSMENT.to_string()
            })
    }

    /// Medication instructions block of a prescription.
    pub fn medication_instructions(&self, medications: &[MedicationRecord]) -> String {
        let prompt = build_instructions_prompt(medications);
        self.generate_with_retry(INSTRUCTIONS_SYSTEM_ROLE, &prompt, &INSTRUCTIONS_BUDGET)
            .unwrap_or_else(|error| {
                tracing::error!(%error, "Instructions generation failed, using fallback");
                FALLBACK_INSTRUCTIONS.to_string()
            })
    }

    /// Follow-up block of a prescription.
    pub fn follow_up_instructions(&self, diagnosis: &str) -> String {
        let prompt = build_follow_up_prompt(diagnosis);
        self.generate_with_retry(FOLLOW_UP_SYSTEM_ROLE, &prompt, &FOLLOW_UP_BUDGET)
            .unwrap_or_else(|error| {
                tracing::error!(%error, "Follow-up generation failed, using fallback");
                FALLBACK_FOLLOW_UP.to_string()
            })
    }

    /// Clinical notes block of a prescription.
    pub fn prescription_notes(&self, patient_info: &PatientInfo, diagnosis: &str) -> String {
        let prompt = build_notes_prompt(patient_info, diagnosis);
        self.generate_with_retry(NOTES_SYSTEM_ROLE, &prompt, &NOTES_BUDGET)
            .unwrap_or_else(|error| {
                tracing::error!(%error, "Notes generation failed, using fallback");
                FALLBACK_NOTES.to_string()
            })
    }
}

fn ensure_disclaimer(text: String) -> String {
    if text.contains(DISCLAIMER) {
        text
    } else {
        format!("{text}\n\n{DISCLAIMER}")
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockGenerator;

    fn meds() -> Vec<MedicationRecord> {
        vec![MedicationRecord {
            name: "Paracetamol".into(),
            dosage: "500mg".into(),
            duration: "3 days".into(),
            purpose: "pain relief".into(),
        }]
    }

    fn intake<'a>(medications: &'a [MedicationRecord]) -> IntakeSummary<'a> {
        IntakeSummary {
            symptoms: "headache",
            duration: "3 days",
            other_symptoms: "",
            allergies: "",
            medications,
        }
    }

    // ── Prompt building ──

    #[test]
    fn patient_prompt_defaults_blank_fields() {
        let medications = meds();
        let prompt = build_patient_prompt(&intake(&medications));
        assert!(prompt.contains("other symptoms: None"));
        assert!(prompt.contains("allergies: None"));
        assert!(prompt.contains("duration: 3 days"));
        assert!(prompt.contains("- Paracetamol: 500mg for 3 days (pain relief)"));
    }

    #[test]
    fn empty_medication_list_renders_placeholder() {
        assert_eq!(
            render_medication_block(&[]),
            "- No medication suggestion available",
        );
    }

    #[test]
    fn doctor_prompt_includes_patient_summary_and_conditions() {
        let info = PatientInfo {
            name: Some("John".into()),
            age: Some("35".into()),
        };
        let medications = meds();
        let prompt = build_doctor_prompt(
            "fever and cough",
            &["Influenza".to_string()],
            &info,
            &medications,
        );
        assert!(prompt.contains("Patient: John, Age: 35"));
        assert!(prompt.contains("Likely Conditions: Influenza"));
        assert!(prompt.contains("**Clinical Assessment:**"));
    }

    #[test]
    fn notes_prompt_includes_diagnosis() {
        let prompt = build_notes_prompt(&PatientInfo::default(), "Migraine");
        assert!(prompt.contains("Diagnosis: Migraine"));
        assert!(prompt.contains("Patient: Unknown"));
    }

    // ── Composition ──

    #[test]
    fn patient_advice_appends_disclaimer() {
        let composer = ResponseComposer::new(Arc::new(MockGenerator::new("Rest and hydrate.")));
        let medications = meds();
        let advice = composer.patient_advice(&intake(&medications));
        assert!(advice.starts_with("Rest and hydrate."));
        assert!(advice.contains(DISCLAIMER));
    }

    #[test]
    fn disclaimer_is_not_duplicated() {
        let already = format!("Advice body.\n\n{DISCLAIMER}");
        let composer = ResponseComposer::new(Arc::new(MockGenerator::new(&already)));
        let medications = meds();
        let advice = composer.patient_advice(&intake(&medications));
        assert_eq!(advice.matches("⚠️ Disclaimer").count(), 1);
    }

    #[test]
    fn one_failure_is_retried_transparently() {
        let mock = Arc::new(MockGenerator::new("Recovered advice.").failing(1));
        let composer = ResponseComposer::new(Arc::clone(&mock) as Arc<dyn TextGenerator>);
        let medications = meds();
        let advice = composer.patient_advice(&intake(&medications));
        assert!(advice.starts_with("Recovered advice."));
        assert_eq!(mock.calls().len(), 2);
    }

    #[test]
    fn persistent_failure_falls_back_with_disclaimer() {
        let composer =
            ResponseComposer::new(Arc::new(MockGenerator::new("unused").failing(10)));
        let medications = meds();
        let advice = composer.patient_advice(&intake(&medications));
        assert!(advice.starts_with(FALLBACK_ADVICE));
        assert!(advice.contains(DISCLAIMER));
    }

    #[test]
    fn prescription_blocks_fall_back_deterministically() {
        let composer = ResponseComposer::new(Arc::new(MockGenerator::new("unused").failing(10)));
        let medications = meds();
        assert_eq!(
            composer.medication_instructions(&medications),
            FALLBACK_INSTRUCTIONS,
        );
        assert_eq!(composer.follow_up_instructions("Migraine"), FALLBACK_FOLLOW_UP);
        assert_eq!(
            composer.prescription_notes(&PatientInfo::default(), "Migraine"),
            FALLBACK_NOTES,
        );
    }

    #[test]
    fn system_roles_reach_the_generator() {
        let mock = Arc::new(MockGenerator::new("ok"));
        let composer = ResponseComposer::new(Arc::clone(&mock) as Arc<dyn TextGenerator>);
        let medications = meds();
        composer.patient_advice(&intake(&medications));
        composer.doctor_assessment("fever", &["Influenza".into()], &PatientInfo::default(), &medications);

        let calls = mock.calls();
        assert!(calls[0].0.contains("conversational medical assistant"));
        assert!(calls[1].0.contains("Dr. HealthMate AI"));
    }
}
