//! Form Collector — the field catalogue, the submitted request, and
//! mandatory-field validation.
//!
//! The catalogue is the single source of truth for the form: the page renders
//! it via `GET /api/v1/letters/form`, validation walks it, and the prompt
//! serializes `LetterRequest` in the same order.

use serde::{Deserialize, Serialize};

use crate::letter::presenter::BUSY_MESSAGE;

pub const FORM_TITLE: &str = "Buddy Letter Generator for VA Claims";
pub const SUBMIT_LABEL: &str = "Generate Buddy Letter";
pub const MISSING_FIELDS_SUMMARY: &str = "Please fill in all required fields.";

// ────────────────────────────────────────────────────────────────────────────
// Field catalogue
// ────────────────────────────────────────────────────────────────────────────

/// One labeled input on the form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
    /// Rendered as a text area rather than a single-line input.
    pub multiline: bool,
    /// Warning shown when a required field is left empty.
    #[serde(skip)]
    pub missing_message: &'static str,
}

pub const FIELDS: &[FormField] = &[
    FormField {
        key: "name",
        label: "Your Name",
        placeholder: "Enter your full name",
        required: true,
        multiline: false,
        missing_message: "Please enter your name.",
    },
    FormField {
        key: "veteran_name",
        label: "Veteran Name",
        placeholder: "Enter the veteran's full name",
        required: false,
        multiline: false,
        missing_message: "",
    },
    FormField {
        key: "relationship_to_veteran",
        label: "Your Relationship to the Veteran",
        placeholder: "E.g., Fellow service member, family member",
        required: true,
        multiline: false,
        missing_message: "Please enter your relationship to the veteran.",
    },
    FormField {
        key: "knowledge_of_veteran",
        label: "How You Know the Veteran",
        placeholder: "Describe how and for how long you've known the veteran",
        required: true,
        multiline: true,
        missing_message: "Please describe how you know the veteran.",
    },
    FormField {
        key: "event_details",
        label: "If you are trying to prove service connection, then list the details of the witnessed event or change",
        placeholder: "Describe the event you witnessed.  If applicable, describe how the veteran changed as a result of this event.",
        required: false,
        multiline: true,
        missing_message: "",
    },
    FormField {
        key: "condition_observations",
        label: "Observations of the Veteran's Condition",
        placeholder: "Be sure to include frequency, duration, and severity of symptoms",
        required: false,
        multiline: true,
        missing_message: "",
    },
    FormField {
        key: "impact_on_daily_life",
        label: "Impact on Daily Life",
        placeholder: "Describe the effect of the condition on the veteran's daily activities, work, and personal life",
        required: false,
        multiline: true,
        missing_message: "",
    },
    FormField {
        key: "additional_comments",
        label: "Additional Comments",
        placeholder: "Add any other relevant comments or information",
        required: false,
        multiline: true,
        missing_message: "",
    },
];

/// Schema served to the page so it renders exactly the validated fields.
#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub busy_message: &'static str,
    pub fields: &'static [FormField],
}

pub fn form_schema() -> FormSchema {
    FormSchema {
        title: FORM_TITLE,
        submit_label: SUBMIT_LABEL,
        busy_message: BUSY_MESSAGE,
        fields: FIELDS,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Submitted request
// ────────────────────────────────────────────────────────────────────────────

/// One form submission. Lives for a single request and is never stored.
///
/// Field declaration order is the serialization order used in the prompt.
/// Keys absent from the submitted JSON default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterRequest {
    pub name: String,
    pub veteran_name: String,
    pub relationship_to_veteran: String,
    pub knowledge_of_veteran: String,
    pub event_details: String,
    pub condition_observations: String,
    pub impact_on_daily_life: String,
    pub additional_comments: String,
}

impl LetterRequest {
    /// Looks up a field value by its catalogue key.
    pub fn value(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "veteran_name" => &self.veteran_name,
            "relationship_to_veteran" => &self.relationship_to_veteran,
            "knowledge_of_veteran" => &self.knowledge_of_veteran,
            "event_details" => &self.event_details,
            "condition_observations" => &self.condition_observations,
            "impact_on_daily_life" => &self.impact_on_daily_life,
            "additional_comments" => &self.additional_comments,
            _ => return None,
        };
        Some(value.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// A warning attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    pub field: String,
    pub message: String,
}

/// Checks every required field. Whitespace-only values count as empty.
/// Returns all warnings at once so the page can flag every missing field.
/// The request itself is never modified.
pub fn validate(request: &LetterRequest) -> Result<(), Vec<FieldWarning>> {
    let warnings: Vec<FieldWarning> = FIELDS
        .iter()
        .filter(|f| f.required)
        .filter(|f| request.value(f.key).map_or(true, |v| v.trim().is_empty()))
        .map(|f| FieldWarning {
            field: f.key.to_string(),
            message: f.missing_message.to_string(),
        })
        .collect();

    if warnings.is_empty() {
        Ok(())
    } else {
        Err(warnings)
    }
}
