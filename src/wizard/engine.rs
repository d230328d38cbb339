use crate::api::FarmStore;
use crate::errors::{SubmitError, WizardError};

use super::field::{
    format_number, parse_finite, round_to_tenth, FieldDescriptor, FieldKind, FieldMap,
    FieldValue, FormDescriptor, StepperField, ValidationError,
};

/// Outcome of feeding typed text into a stepper field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// Stored exactly as typed: an in-progress token or an in-range number.
    Stored,
    /// Parsed, clamped into range and stored as the given text.
    Clamped(String),
    /// Did not parse; the previous value is kept.
    Rejected,
}

/// Linear multi-step form: field values, current step and numeric
/// normalization for stepper fields.
///
/// Steps are 1-indexed and `next`/`back` saturate at the ends rather than
/// wrapping or failing. Submitting is an action on the final step, not a
/// transition.
pub struct FormWizardEngine {
    descriptor: FormDescriptor,
    fields: FieldMap,
    step: usize,
}

impl FormWizardEngine {
    pub fn new(descriptor: FormDescriptor) -> Result<Self, WizardError> {
        let total = descriptor.total_steps();
        if total == 0 {
            return Err(WizardError::EmptyForm(descriptor.name.to_string()));
        }
        if let Some(field) = descriptor
            .fields
            .iter()
            .find(|field| field.step == 0 || field.step > total)
        {
            return Err(WizardError::StepOutOfRange {
                field: field.key.to_string(),
                step: field.step,
                total,
            });
        }

        let mut fields = descriptor.defaults.clone();
        for field in &descriptor.fields {
            let value = fields
                .entry(field.key.to_string())
                .or_insert_with(|| field.empty_value());
            if let Some(text) = field.stepper().and_then(|stepper| out_of_range(stepper, value)) {
                *value = FieldValue::Text(text);
            }
        }

        Ok(Self {
            descriptor,
            fields,
            step: 1,
        })
    }

    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.descriptor.total_steps()
    }

    pub fn is_first_step(&self) -> bool {
        self.step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn step_title(&self) -> &'static str {
        self.descriptor.step_title(self.step).unwrap_or_default()
    }

    /// Completed share of the wizard, `step / total_steps`.
    pub fn progress(&self) -> f64 {
        self.step as f64 / self.total_steps() as f64
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    /// Stores `value`, replacing any previous value.
    ///
    /// Values are kept verbatim except a number outside a stepper field's
    /// range, which is stored clamped.
    pub fn update_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        let mut value = value.into();
        let clamped = self
            .descriptor
            .field(name)
            .and_then(FieldDescriptor::stepper)
            .and_then(|stepper| out_of_range(stepper, &value));
        if let Some(text) = clamped {
            tracing::trace!(field = name, value = %text, "clamped stepper update");
            value = FieldValue::Text(text);
        }
        self.fields.insert(name.to_string(), value);
    }

    /// Moves a stepper field by `delta`, clamps, rounds to one decimal and
    /// returns the stored text.
    ///
    /// A current value that does not parse counts as the field minimum.
    pub fn adjust_value(&mut self, field: &str, delta: f64) -> Result<String, WizardError> {
        let stepper = self.stepper_for(field)?;
        let current = self
            .text(field)
            .and_then(parse_finite)
            .unwrap_or(stepper.min());
        let delta = if delta.is_finite() { delta } else { 0.0 };

        let adjusted = stepper.clamp(round_to_tenth(stepper.clamp(current + delta)));
        let text = format_number(adjusted);
        self.fields
            .insert(field.to_string(), FieldValue::Text(text.clone()));
        Ok(text)
    }

    /// Adds one stepper increment.
    pub fn increment(&mut self, field: &str) -> Result<String, WizardError> {
        let step = self.stepper_for(field)?.step();
        self.adjust_value(field, step)
    }

    /// Subtracts one stepper increment.
    pub fn decrement(&mut self, field: &str) -> Result<String, WizardError> {
        let step = self.stepper_for(field)?.step();
        self.adjust_value(field, -step)
    }

    /// Applies typed text to a stepper field.
    ///
    /// `""`, `"-"` and text ending in `.` are kept as typed so a value like
    /// `-0.5` can be entered one character at a time. Anything else must
    /// parse as a finite number and is clamped into range; unparseable text
    /// leaves the field untouched.
    pub fn handle_text_change(&mut self, field: &str, text: &str) -> Result<TextChange, WizardError> {
        let stepper = self.stepper_for(field)?;

        if text.is_empty() || text == "-" || text.ends_with('.') {
            self.fields
                .insert(field.to_string(), FieldValue::Text(text.to_string()));
            return Ok(TextChange::Stored);
        }

        let Some(number) = parse_finite(text) else {
            tracing::trace!(field, text, "rejected non-numeric input");
            return Ok(TextChange::Rejected);
        };

        if stepper.contains(number) {
            self.fields
                .insert(field.to_string(), FieldValue::Text(format_number(number)));
            Ok(TextChange::Stored)
        } else {
            let clamped = format_number(stepper.clamp(number));
            self.fields
                .insert(field.to_string(), FieldValue::Text(clamped.clone()));
            Ok(TextChange::Clamped(clamped))
        }
    }

    /// Advances one step; no-op on the last step.
    pub fn next(&mut self) {
        if self.step < self.total_steps() {
            self.step += 1;
            tracing::debug!(form = self.descriptor.name, step = self.step, "advanced");
        }
    }

    /// Returns one step; no-op on the first step.
    pub fn back(&mut self) {
        if self.step > 1 {
            self.step -= 1;
            tracing::debug!(form = self.descriptor.name, step = self.step, "went back");
        }
    }

    /// Jumps to `step`, saturating into `[1, total_steps]`.
    pub fn set_step(&mut self, step: usize) {
        self.step = step.clamp(1, self.total_steps());
    }

    /// Validates every field shown on `step`.
    pub fn validate_step(&self, step: usize) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = self
            .descriptor
            .fields_for_step(step)
            .filter_map(|field| field.validate(self.fields.get(field.key)).err())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn validate_current_step(&self) -> Result<(), Vec<ValidationError>> {
        self.validate_step(self.step)
    }

    /// Labelled values in field order for a review screen.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        self.descriptor
            .fields
            .iter()
            .map(|field| {
                let value = match self.fields.get(field.key) {
                    Some(value) if !value.is_blank() => value.to_string(),
                    _ => "[unfilled]".to_string(),
                };
                (field.label, value)
            })
            .collect()
    }

    /// Hands the collected fields to `store`. Only valid on the final step.
    pub fn submit<S>(&self, store: &S) -> Result<(), SubmitError>
    where
        S: FarmStore + ?Sized,
    {
        if !self.is_last_step() {
            return Err(SubmitError::NotAtFinalStep {
                step: self.step,
                total: self.total_steps(),
            });
        }
        tracing::info!(form = self.descriptor.name, fields = self.fields.len(), "submitting form");
        store.save_farm_details(&self.fields)
    }

    fn stepper_for(&self, field: &str) -> Result<StepperField, WizardError> {
        let descriptor: &FieldDescriptor = self
            .descriptor
            .field(field)
            .ok_or_else(|| WizardError::UnknownField(field.to_string()))?;
        match &descriptor.kind {
            FieldKind::Stepper(stepper) => Ok(*stepper),
            _ => Err(WizardError::NotAStepper(field.to_string())),
        }
    }
}

/// Clamped text for a finite number outside the stepper range.
fn out_of_range(stepper: &StepperField, value: &FieldValue) -> Option<String> {
    value
        .as_text()
        .and_then(parse_finite)
        .filter(|number| !stepper.contains(*number))
        .map(|number| format_number(stepper.clamp(number)))
}
