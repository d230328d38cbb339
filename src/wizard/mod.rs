//! Multi-step form wizard: field model, engine, the farm details form and
//! submission under a save-failure policy.

mod engine;
pub mod farm;
mod field;
mod submit;

pub use engine::{FormWizardEngine, TextChange};
pub use farm::{apply_location_hint, farm_details_form, farm_details_form_for};
pub use field::{
    format_number, parse_finite, FieldDescriptor, FieldKind, FieldMap, FieldValue,
    FormDescriptor, StepperField, ValidationError, Validator,
};
pub use submit::{submit_with_policy, SaveFailurePolicy, SubmitOutcome, DEFAULT_RETRY_ATTEMPTS};
