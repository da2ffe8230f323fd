//! Smalltalk shortcuts for the single-shot helpers.
//!
//! Substring checks on the normalized input; the staged flows do not
//! consult these.

use crate::matching::normalize;

/// Patient-voice smalltalk reply, if the input is smalltalk.
pub fn patient_smalltalk(text: &str) -> Option<String> {
    let t = normalize(text);
    if ["hi", "hello", "hey"].iter().any(|greet| t.contains(greet)) {
        return Some("Hi there! How are you feeling today?".to_string());
    }
    if t.contains("how are you") {
        return Some(
            "I'm doing great, thank you! More importantly, how are you feeling?".to_string(),
        );
    }
    if t.contains("not feeling well") {
        return Some(
            "I'm sorry to hear that. Can you tell me more about your symptoms?".to_string(),
        );
    }
    None
}

/// Clinician-voice smalltalk reply, if the input is smalltalk.
pub fn doctor_smalltalk(text: &str) -> Option<String> {
    let t = normalize(text);
    if ["hi", "hello", "hey"].iter().any(|greet| t.contains(greet)) {
        return Some(
            "Hello! I'm Dr. HealthMate AI. How can I assist you with your medical consultation today?"
                .to_string(),
        );
    }
    if t.contains("how are you") {
        return Some(
            "I'm doing great, thank you. How are you feeling today? What symptoms are you experiencing?"
                .to_string(),
        );
    }
    if t.contains("thank you") || t.contains("thanks") {
        return Some(
            "You're welcome! Is there anything else I can help you with regarding your health?"
                .to_string(),
        );
    }
    None
}
