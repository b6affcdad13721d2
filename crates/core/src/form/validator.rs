//! Runtime field validation built from the form schema.
//!
//! Fields are not known until course data loads, so the ruleset is
//! compiled per step from the `FormField` list rather than declared
//! statically. Rules are keyed `"{field_id}-{language}"`, the same key
//! the rendering layer uses for its controls, so every error message
//! binds to exactly the control that produced the value.

use std::collections::BTreeMap;

use regex::Regex;
use validator::ValidateEmail;

use crate::form::schema::{FieldType, FormField};
use crate::localization::Language;

/// E.164-like phone pattern: optional `+`, no leading zero, 2 to 15 digits.
const TEL_PATTERN: &str = r"^\+?[1-9]\d{1,14}$";

// ---------------------------------------------------------------------------
// Compiled rules
// ---------------------------------------------------------------------------

/// One field's compiled validation rule.
#[derive(Debug, Clone)]
struct FieldRule {
    key: String,
    field_type: FieldType,
    required: bool,
    /// Label resolved to the active language, used in error messages.
    label: String,
}

/// A compiled validator for one step's fields in one language.
#[derive(Debug)]
pub struct FieldValidator {
    rules: Vec<FieldRule>,
    tel: Regex,
}

impl FieldValidator {
    /// Compile one rule per field, keyed for the given language.
    pub fn for_step(fields: &[FormField], language: Language) -> Self {
        let rules = fields
            .iter()
            .map(|field| FieldRule {
                key: field.value_key(language),
                field_type: field.field_type,
                required: field.required,
                label: field.label.resolve(language).to_string(),
            })
            .collect();

        Self {
            rules,
            tel: Regex::new(TEL_PATTERN).expect("tel pattern is a valid regex"),
        }
    }

    /// Validate a value map against the compiled rules.
    ///
    /// Returns error messages keyed exactly like the value map; an empty
    /// result means the step passes. A missing key is treated as an empty
    /// value.
    pub fn validate(&self, values: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();

        for rule in &self.rules {
            let raw = values.get(&rule.key).map(String::as_str).unwrap_or("");
            let value = raw.trim();

            if value.is_empty() {
                if rule.required {
                    errors.insert(rule.key.clone(), format!("{} is required.", rule.label));
                }
                // Optional and empty: valid regardless of type pattern.
                continue;
            }

            if let Some(message) = self.pattern_error(rule, value) {
                errors.insert(rule.key.clone(), message);
            }
        }

        errors
    }

    fn pattern_error(&self, rule: &FieldRule, value: &str) -> Option<String> {
        match rule.field_type {
            FieldType::Email if !value.validate_email() => Some(format!(
                "{} must be a valid email address.",
                rule.label
            )),
            FieldType::Tel if !self.tel.is_match(value) => Some(format!(
                "{} must be a valid phone number.",
                rule.label
            )),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
