//! Step navigation engine for the public booking flow.
//!
//! A [`FormWalk`] carries one client session through a registration form:
//! it validates the current step's fields, evaluates conditional
//! navigation rules to pick the next step, and accumulates captured values
//! across every visited step. The walk is isolated from rendering so the
//! whole flow is testable without a UI. Nothing here persists; a session
//! abandoned mid-walk leaves no trace.

use std::collections::BTreeMap;

use crate::form::schema::{FormStep, RegistrationForm};
use crate::form::validator::FieldValidator;
use crate::localization::Language;
use crate::types::Id;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of submitting the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Validation failed. The walk stays on the current step and every
    /// field error surfaces at once; no partial advance.
    Rejected(BTreeMap<String, String>),
    /// Moved to the step at `index`.
    Advanced { index: usize },
    /// The final step was submitted cleanly; the flow exits to payment.
    Completed,
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// One client session's progress through a registration form.
#[derive(Debug, Clone)]
pub struct FormWalk {
    form: RegistrationForm,
    language: Language,
    current_index: usize,
    values: BTreeMap<String, String>,
}

impl FormWalk {
    /// Start a walk at the first step.
    pub fn new(form: RegistrationForm, language: Language) -> Self {
        Self {
            form,
            language,
            current_index: 0,
            values: BTreeMap::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_step(&self) -> Option<&FormStep> {
        self.form.step_at(self.current_index)
    }

    pub fn is_final_step(&self) -> bool {
        self.form.step_count() > 0 && self.current_index == self.form.step_count() - 1
    }

    /// Every value captured so far, keyed `"{field_id}-{language}"`.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Record an answer for a field. Select answers are stored in their
    /// English-resolved representation, which is what navigation rules
    /// compare against.
    pub fn set_answer(&mut self, field_id: Id, value: impl Into<String>) {
        let key = format!("{}-{}", field_id, self.language.code());
        self.values.insert(key, value.into());
    }

    /// The captured answer for a field, if any.
    pub fn answer(&self, field_id: Id) -> Option<&str> {
        let key = format!("{}-{}", field_id, self.language.code());
        self.values.get(&key).map(String::as_str)
    }

    /// Captured values re-keyed by each field's English-resolved label,
    /// the shape the booking transaction receives as `form_data`. Labels
    /// are resolved in English so downstream consumers (booked-by name
    /// derivation, the admin table) see stable keys whatever language the
    /// session ran in.
    pub fn form_data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        for step in &self.form.steps {
            for field in &step.fields {
                let key = field.value_key(self.language);
                if let Some(value) = self.values.get(&key) {
                    data.insert(field.label.resolve(Language::En).to_string(), value.clone());
                }
            }
        }
        data
    }

    /// Validate the current step and advance.
    ///
    /// On validation failure the state is unchanged. On success, the first
    /// matching navigation rule (array order) picks the next step by id;
    /// no match, or a match whose target step no longer exists, falls
    /// through to the next sequential step. Submitting the last step
    /// completes the walk.
    pub fn submit_step(&mut self) -> StepOutcome {
        let Some(step) = self.form.step_at(self.current_index) else {
            // Empty form: nothing to collect.
            return StepOutcome::Completed;
        };

        let errors = FieldValidator::for_step(&step.fields, self.language).validate(&self.values);
        if !errors.is_empty() {
            return StepOutcome::Rejected(errors);
        }

        if self.current_index == self.form.step_count() - 1 {
            return StepOutcome::Completed;
        }

        let next = self.next_index(step);
        self.current_index = next;
        StepOutcome::Advanced { index: next }
    }

    /// Step back one step, flooring at the first. Never re-validates and
    /// never clears captured values.
    pub fn previous_step(&mut self) -> usize {
        self.current_index = self.current_index.saturating_sub(1);
        self.current_index
    }

    /// Pick the next step index after a successful submit.
    fn next_index(&self, step: &FormStep) -> usize {
        for rule in &step.navigation_rules {
            let Some(field) = step.field(rule.field_id) else {
                // Rule references a removed field: inert.
                continue;
            };
            let key = field.value_key(self.language);
            let Some(value) = self.values.get(&key) else {
                continue;
            };
            if *value == rule.value {
                if let Some(index) = self.form.index_of(rule.next_step_id) {
                    return index;
                }
                // Stale target (step edited away): default advance.
                break;
            }
        }
        self.current_index + 1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
