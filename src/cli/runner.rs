use crate::api::FarmStore;
use crate::errors::CliError;
use crate::location::LocationResolver;
use crate::wizard::farm::STATE;
use crate::wizard::{
    submit_with_policy, FieldDescriptor, FieldKind, FieldValue, FormWizardEngine,
    SaveFailurePolicy, SubmitOutcome, TextChange,
};

use super::interaction::{FieldPrompt, FieldResponse, StepAction, WizardInteraction};
use super::output;

const PROGRESS_WIDTH: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardResult {
    Submitted(SubmitOutcome),
    Cancelled,
}

enum InputOutcome {
    Accepted(Option<String>),
    Rejected(String),
}

/// Drives a [`FormWizardEngine`] through an interaction until the form is
/// submitted or cancelled.
pub struct WizardRunner<'a> {
    engine: FormWizardEngine,
    resolver: &'a LocationResolver,
    policy: SaveFailurePolicy,
}

impl<'a> WizardRunner<'a> {
    pub fn new(
        engine: FormWizardEngine,
        resolver: &'a LocationResolver,
        policy: SaveFailurePolicy,
    ) -> Self {
        Self {
            engine,
            resolver,
            policy,
        }
    }

    pub fn engine(&self) -> &FormWizardEngine {
        &self.engine
    }

    pub fn run(
        &mut self,
        interaction: &mut dyn WizardInteraction,
        store: &dyn FarmStore,
    ) -> Result<WizardResult, CliError> {
        'steps: loop {
            output::section(format!(
                "{}: {}",
                self.engine.descriptor().name,
                self.engine.step_title()
            ));
            output::detail(output::progress_bar(
                self.engine.step(),
                self.engine.total_steps(),
                PROGRESS_WIDTH,
            ));

            let fields: Vec<FieldDescriptor> = self
                .engine
                .descriptor()
                .fields_for_step(self.engine.step())
                .cloned()
                .collect();
            let mut index = 0;
            while index < fields.len() {
                let field = &fields[index];
                let current = self
                    .engine
                    .value(field.key)
                    .cloned()
                    .unwrap_or_else(|| field.empty_value());
                let prompt = FieldPrompt {
                    field,
                    current: &current,
                };
                match interaction.prompt_field(&prompt)? {
                    FieldResponse::Keep => index += 1,
                    FieldResponse::Cancel => return Ok(self.cancel()),
                    FieldResponse::Back => {
                        if index > 0 {
                            index -= 1;
                        } else if !self.engine.is_first_step() {
                            self.engine.back();
                            continue 'steps;
                        } else {
                            output::warning("Already at the first field.");
                        }
                    }
                    FieldResponse::Clear => {
                        if matches!(field.kind, FieldKind::Toggle | FieldKind::Choice(_)) {
                            output::warning(format!("{} cannot be cleared.", field.label));
                        } else {
                            self.engine.update_field(field.key, "");
                            index += 1;
                        }
                    }
                    FieldResponse::Increment => {
                        let text = self.engine.increment(field.key)?;
                        output::detail(format!("{}: {}", field.label, text));
                    }
                    FieldResponse::Decrement => {
                        let text = self.engine.decrement(field.key)?;
                        output::detail(format!("{}: {}", field.label, text));
                    }
                    FieldResponse::Value(text) => match self.apply_input(field, &text)? {
                        InputOutcome::Accepted(note) => {
                            if let Some(note) = note {
                                output::detail(note);
                            }
                            index += 1;
                        }
                        InputOutcome::Rejected(message) => output::warning(message),
                    },
                }
            }

            if let Err(errors) = self.engine.validate_current_step() {
                for error in errors {
                    output::warning(error);
                }
                continue 'steps;
            }

            if self.engine.is_last_step() {
                self.print_summary();
            }

            loop {
                match interaction.choose_action(self.engine.step(), self.engine.total_steps())? {
                    StepAction::Cancel => return Ok(self.cancel()),
                    StepAction::Back => {
                        self.engine.back();
                        continue 'steps;
                    }
                    StepAction::Next if self.engine.is_last_step() => {
                        output::warning("This is the final step; choose submit to save.");
                    }
                    StepAction::Next => {
                        self.engine.next();
                        continue 'steps;
                    }
                    StepAction::Submit if !self.engine.is_last_step() => {
                        output::warning("Finish the remaining steps before submitting.");
                    }
                    StepAction::Submit => {
                        match submit_with_policy(&self.engine, store, self.policy) {
                            Ok(outcome) => return Ok(WizardResult::Submitted(outcome)),
                            Err(err) => {
                                output::error(format!("Saving failed: {}", err));
                                output::detail("Submit again, go back to edit, or cancel.");
                            }
                        }
                    }
                }
            }
        }
    }

    fn cancel(&self) -> WizardResult {
        tracing::info!(step = self.engine.step(), "wizard cancelled");
        output::info("Wizard cancelled; nothing was saved.");
        WizardResult::Cancelled
    }

    fn print_summary(&self) {
        output::section("Review");
        for (label, value) in self.engine.summary() {
            output::info(format!("  {:<24} {}", label, value));
        }
    }

    fn apply_input(
        &mut self,
        field: &FieldDescriptor,
        text: &str,
    ) -> Result<InputOutcome, CliError> {
        if field.key == STATE {
            let resolver = self.resolver;
            return Ok(match resolver.resolve_str(text) {
                Some(state) => {
                    let note = (state != text).then(|| format!("Resolved `{}` to {}.", text, state));
                    self.engine.update_field(STATE, state);
                    InputOutcome::Accepted(note)
                }
                None => InputOutcome::Rejected(format!(
                    "`{}` is not a recognised state; use the `states` command for the list.",
                    text
                )),
            });
        }

        match &field.kind {
            FieldKind::Stepper(stepper) => {
                Ok(match self.engine.handle_text_change(field.key, text)? {
                    TextChange::Stored => InputOutcome::Accepted(None),
                    TextChange::Clamped(value) => InputOutcome::Accepted(Some(format!(
                        "{} kept within {}: {}",
                        field.label,
                        stepper.range_label(),
                        value
                    ))),
                    TextChange::Rejected => {
                        InputOutcome::Rejected(format!("{} must be a number.", field.label))
                    }
                })
            }
            FieldKind::Toggle => Ok(match parse_flag(text) {
                Some(flag) => {
                    self.engine.update_field(field.key, flag);
                    InputOutcome::Accepted(None)
                }
                None => InputOutcome::Rejected(format!("{} expects yes or no.", field.label)),
            }),
            FieldKind::Choice(options) => Ok(match match_choice(options, text) {
                Some(option) => {
                    let option = option.to_string();
                    self.engine.update_field(field.key, option);
                    InputOutcome::Accepted(None)
                }
                None => InputOutcome::Rejected(format!(
                    "{} must be one of: {}",
                    field.label,
                    options.join(", ")
                )),
            }),
            FieldKind::Text | FieldKind::Number => {
                let value = FieldValue::from(text);
                Ok(match field.validate(Some(&value)) {
                    Ok(()) => {
                        self.engine.update_field(field.key, value);
                        InputOutcome::Accepted(None)
                    }
                    Err(err) => InputOutcome::Rejected(err.message),
                })
            }
        }
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Case-insensitive option name or 1-based position.
fn match_choice<'o>(options: &'o [String], text: &str) -> Option<&'o str> {
    let text = text.trim();
    if let Some(option) = options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(text))
    {
        return Some(option);
    }
    text.parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| options.get(index))
        .map(String::as_str)
}
