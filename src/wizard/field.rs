use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Value held by a single form field.
///
/// Numeric fields stay textual so that partially typed input such as `"-"`
/// or `"6."` survives between keystrokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(true) => f.write_str("yes"),
            FieldValue::Flag(false) => f.write_str("no"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Field name to value mapping handed to the save endpoint.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Numeric field edited with +/- controls and clamped to an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepperField {
    min: f64,
    max: f64,
    step: f64,
}

impl StepperField {
    /// Bounds given in the wrong order are swapped; a zero or non-finite
    /// step falls back to 1.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let step = if step.is_finite() && step != 0.0 {
            step.abs()
        } else {
            1.0
        };
        Self { min, max, step }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Range label such as `4–9`.
    pub fn range_label(&self) -> String {
        format!("{}–{}", format_number(self.min), format_number(self.max))
    }
}

/// Parses `text` as a finite decimal, ignoring surrounding whitespace.
pub fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Shortest decimal rendering: `9` rather than `9.0`, never `-0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".into();
    }
    value.to_string()
}

/// Rounds to one decimal place, halves rounding up.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    Number,
    Choice(Vec<String>),
    Stepper(StepperField),
    Toggle,
}

type ValidatorCallback = dyn Fn(&str) -> Result<(), String> + Send + Sync;

/// Extra per-field checks applied on step completion.
#[derive(Clone)]
pub enum Validator {
    None,
    Custom(Arc<ValidatorCallback>),
}

impl Validator {
    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        Validator::Custom(Arc::new(check))
    }

    fn check(&self, input: &str) -> Result<(), String> {
        match self {
            Validator::None => Ok(()),
            Validator::Custom(func) => func(input),
        }
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Declarative description of a single form field.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    /// 1-indexed step the field is shown on.
    pub step: usize,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(key: &'static str, label: &'static str, step: usize, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            step,
            kind,
            required: false,
            help: None,
            validator: Validator::None,
        }
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn stepper(&self) -> Option<&StepperField> {
        match &self.kind {
            FieldKind::Stepper(stepper) => Some(stepper),
            _ => None,
        }
    }

    /// Value a freshly created form holds when no default is declared.
    pub fn empty_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Toggle => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Checks a value for step completion.
    pub fn validate(&self, value: Option<&FieldValue>) -> Result<(), ValidationError> {
        let fail = |message: String| Err(ValidationError::new(self.key, message));

        if let FieldKind::Toggle = self.kind {
            return match value {
                Some(FieldValue::Flag(_)) => Ok(()),
                None if !self.required => Ok(()),
                _ => fail(format!("{} must be yes or no", self.label)),
            };
        }

        let text = match value {
            Some(FieldValue::Text(text)) => text.trim(),
            Some(FieldValue::Flag(_)) => return fail(format!("{} expects text", self.label)),
            None => "",
        };
        if text.is_empty() {
            return if self.required {
                fail(format!("{} is required", self.label))
            } else {
                Ok(())
            };
        }

        match &self.kind {
            FieldKind::Number => {
                if parse_finite(text).is_none() {
                    return fail(format!("{} must be a number", self.label));
                }
            }
            FieldKind::Stepper(stepper) => match parse_finite(text) {
                Some(value) if stepper.contains(value) => {}
                Some(_) => {
                    return fail(format!(
                        "{} must be between {}",
                        self.label,
                        stepper.range_label()
                    ))
                }
                None => return fail(format!("{} must be a number", self.label)),
            },
            FieldKind::Choice(options) => {
                if !options.iter().any(|option| option == text) {
                    return fail(format!(
                        "{} must be one of: {}",
                        self.label,
                        options.join(", ")
                    ));
                }
            }
            FieldKind::Text | FieldKind::Toggle => {}
        }

        self.validator
            .check(text)
            .or_else(|message| fail(message))
    }
}

/// Metadata describing a full wizard: step titles, field order and defaults.
#[derive(Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub steps: Vec<&'static str>,
    pub fields: Vec<FieldDescriptor>,
    pub defaults: FieldMap,
}

impl FormDescriptor {
    pub fn new(name: &'static str, steps: Vec<&'static str>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            steps,
            fields,
            defaults: FieldMap::new(),
        }
    }

    pub fn with_default(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.defaults.insert(key.to_string(), value.into());
        self
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn fields_for_step(&self, step: usize) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |field| field.step == step)
    }

    pub fn step_title(&self, step: usize) -> Option<&'static str> {
        step.checked_sub(1)
            .and_then(|index| self.steps.get(index))
            .copied()
    }
}
