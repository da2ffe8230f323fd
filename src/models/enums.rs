use serde::{Deserialize, Serialize};

/// Error for parsing an enum from its string form.
#[derive(Debug, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Stage {
    Greeting => "greeting",
    AskSymptoms => "ask_symptoms",
    AskDuration => "ask_duration",
    AskOther => "ask_other",
    AskAllergies => "ask_allergies",
    GiveAdvice => "give_advice",
});

str_enum!(ConsultationStage {
    Greeting => "greeting",
    CollectPatientInfo => "collect_patient_info",
    ProvideAssessment => "provide_assessment",
});
