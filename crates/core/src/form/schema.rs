//! Registration form schema: steps, fields, and conditional navigation
//! rules.
//!
//! Step identity is by id, not by position: admins may reorder steps
//! without breaking rule references. Field order within a step is the
//! display and validation order.

use serde::{Deserialize, Serialize};

use crate::localization::{Language, LocalizedString};
use crate::types::Id;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Input control types available to the form builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Textarea => "textarea",
            Self::Select => "select",
        }
    }
}

/// One input field on a form step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: Id,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: LocalizedString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<LocalizedString>,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` fields; `None` for every other type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<LocalizedString>>,
}

impl FormField {
    /// The key under which the rendering layer submits this field's value.
    ///
    /// One logical field renders one control per active language, so value
    /// maps and validator rule maps key per language as well.
    pub fn value_key(&self, language: Language) -> String {
        format!("{}-{}", self.id, language.code())
    }
}

// ---------------------------------------------------------------------------
// Steps and navigation
// ---------------------------------------------------------------------------

/// Conditional logic selecting the next step based on a prior answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRule {
    /// Must reference a `select` field in the same step.
    pub field_id: Id,
    /// Matched against the English-resolved representation of the captured
    /// answer.
    pub value: String,
    /// Must reference a different step in the same form; a stale reference
    /// leaves the rule inert.
    pub next_step_id: Id,
}

/// One page of a multi-stage registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStep {
    pub id: Id,
    pub name: LocalizedString,
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub navigation_rules: Vec<NavigationRule>,
}

impl FormStep {
    pub fn field(&self, field_id: Id) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == field_id)
    }
}

/// The ordered step sequence of one course's registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub steps: Vec<FormStep>,
}

impl RegistrationForm {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step_at(&self, index: usize) -> Option<&FormStep> {
        self.steps.get(index)
    }

    /// Position of a step id in the ordered sequence.
    pub fn index_of(&self, step_id: Id) -> Option<usize> {
        self.steps.iter().position(|step| step.id == step_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
