//! Structural validation for registration forms.
//!
//! Run by the admin form builder before a form is saved; the runtime
//! engine assumes forms passed this check. Returns every issue at once so
//! the builder UI can annotate the whole form in one pass.

use serde::Serialize;

use crate::form::schema::{FieldType, RegistrationForm};
use crate::types::Id;

/// One structural problem in a registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormIssue {
    #[error("Form has no steps")]
    EmptyForm,

    #[error("Step id {step_id} appears more than once")]
    DuplicateStepId { step_id: Id },

    #[error("Step {step_id}: navigation rule references unknown field {field_id}")]
    RuleFieldMissing { step_id: Id, field_id: Id },

    #[error("Step {step_id}: navigation rule references field {field_id}, which is not a select")]
    RuleFieldNotSelect { step_id: Id, field_id: Id },

    #[error("Step {step_id}: navigation rule targets unknown step {next_step_id}")]
    RuleTargetMissing { step_id: Id, next_step_id: Id },

    #[error("Step {step_id}: navigation rule targets its own step")]
    RuleTargetsSelf { step_id: Id },

    #[error("Step {step_id}: select field {field_id} has no options")]
    OptionsMissing { step_id: Id, field_id: Id },

    #[error("Step {step_id}: non-select field {field_id} carries options")]
    OptionsOnNonSelect { step_id: Id, field_id: Id },
}

/// Check a form's internal references. An empty result means the form is
/// structurally sound.
pub fn validate_form(form: &RegistrationForm) -> Vec<FormIssue> {
    let mut issues = Vec::new();

    if form.steps.is_empty() {
        issues.push(FormIssue::EmptyForm);
        return issues;
    }

    for (position, step) in form.steps.iter().enumerate() {
        if form.steps[..position].iter().any(|prior| prior.id == step.id) {
            issues.push(FormIssue::DuplicateStepId { step_id: step.id });
        }
    }

    for step in &form.steps {
        for field in &step.fields {
            let has_options = field
                .options
                .as_ref()
                .is_some_and(|options| !options.is_empty());
            match field.field_type {
                FieldType::Select if !has_options => issues.push(FormIssue::OptionsMissing {
                    step_id: step.id,
                    field_id: field.id,
                }),
                FieldType::Select => {}
                _ if field.options.is_some() => issues.push(FormIssue::OptionsOnNonSelect {
                    step_id: step.id,
                    field_id: field.id,
                }),
                _ => {}
            }
        }

        for rule in &step.navigation_rules {
            match step.field(rule.field_id) {
                None => issues.push(FormIssue::RuleFieldMissing {
                    step_id: step.id,
                    field_id: rule.field_id,
                }),
                Some(field) if field.field_type != FieldType::Select => {
                    issues.push(FormIssue::RuleFieldNotSelect {
                        step_id: step.id,
                        field_id: rule.field_id,
                    });
                }
                Some(_) => {}
            }

            if rule.next_step_id == step.id {
                issues.push(FormIssue::RuleTargetsSelf { step_id: step.id });
            } else if form.index_of(rule.next_step_id).is_none() {
                issues.push(FormIssue::RuleTargetMissing {
                    step_id: step.id,
                    next_step_id: rule.next_step_id,
                });
            }
        }
    }

    issues
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
