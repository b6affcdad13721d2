//! Registration form model and runtime engines.
//!
//! `schema` is the single source of truth for what a form looks like,
//! shared by the admin form builder and the public booking flow.
//! `structure` checks a form's internal references, `validator` compiles
//! per-field rules at runtime, and `walk` steps a session through the form.

pub mod schema;
pub mod structure;
pub mod validator;
pub mod walk;

pub use schema::{FieldType, FormField, FormStep, NavigationRule, RegistrationForm};
pub use structure::{validate_form, FormIssue};
pub use validator::FieldValidator;
pub use walk::{FormWalk, StepOutcome};
