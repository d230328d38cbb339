//! How the wizard runner talks to a person: prompts for a field value and
//! the step action. Interactive sessions go through dialoguer widgets;
//! script mode reads one line per answer from the shared script input.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::errors::CliError;
use crate::wizard::{FieldDescriptor, FieldKind, FieldValue};

use super::context::ScriptInput;
use super::output;

/// A single field question.
pub struct FieldPrompt<'a> {
    pub field: &'a FieldDescriptor,
    pub current: &'a FieldValue,
}

impl FieldPrompt<'_> {
    pub fn is_stepper(&self) -> bool {
        self.field.stepper().is_some()
    }

    /// `Soil pH (4–9, +/-) [6.5]`
    pub fn label_line(&self) -> String {
        let mut line = self.field.label.to_string();
        match &self.field.kind {
            FieldKind::Stepper(stepper) => {
                line.push_str(&format!(" ({}, +/-)", stepper.range_label()));
            }
            FieldKind::Choice(options) => {
                line.push_str(&format!(" ({})", options.join("/")));
            }
            FieldKind::Toggle => line.push_str(" (y/n)"),
            FieldKind::Text | FieldKind::Number => {}
        }
        if self.field.required {
            line.push('*');
        }
        if !self.current.is_blank() {
            line.push_str(&format!(" [{}]", self.current));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldResponse {
    Value(String),
    Keep,
    Clear,
    Increment,
    Decrement,
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Back,
    Submit,
    Cancel,
}

pub trait WizardInteraction {
    fn prompt_field(&mut self, prompt: &FieldPrompt<'_>) -> Result<FieldResponse, CliError>;
    fn choose_action(&mut self, step: usize, total: usize) -> Result<StepAction, CliError>;
}

/// Maps a typed line onto a field response.
///
/// Empty input keeps the current value. `+` and `-` only act as stepper
/// controls; on other fields they are ordinary text.
pub fn parse_field_command(input: &str, stepper: bool) -> FieldResponse {
    let trimmed = input.trim();
    match trimmed {
        "" => FieldResponse::Keep,
        ":back" => FieldResponse::Back,
        ":cancel" => FieldResponse::Cancel,
        ":clear" => FieldResponse::Clear,
        "+" if stepper => FieldResponse::Increment,
        "-" if stepper => FieldResponse::Decrement,
        other => FieldResponse::Value(other.to_string()),
    }
}

/// Maps a typed line onto a step action. An empty line moves forward,
/// which on the final step means submitting.
pub fn parse_step_action(input: &str, last_step: bool) -> Option<StepAction> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" if last_step => Some(StepAction::Submit),
        "" | "n" | "next" => Some(StepAction::Next),
        "b" | "back" => Some(StepAction::Back),
        "s" | "submit" => Some(StepAction::Submit),
        "c" | "cancel" | "q" => Some(StepAction::Cancel),
        _ => None,
    }
}

pub struct DialoguerInteraction<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> DialoguerInteraction<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl WizardInteraction for DialoguerInteraction<'_> {
    fn prompt_field(&mut self, prompt: &FieldPrompt<'_>) -> Result<FieldResponse, CliError> {
        if let Some(help) = prompt.field.help {
            output::detail(help);
        }
        match &prompt.field.kind {
            FieldKind::Choice(options) => {
                let current = prompt
                    .current
                    .as_text()
                    .and_then(|text| options.iter().position(|option| option == text))
                    .unwrap_or(0);
                let choice = Select::with_theme(self.theme)
                    .with_prompt(prompt.field.label)
                    .items(options.as_slice())
                    .default(current)
                    .interact_opt()?;
                Ok(match choice {
                    Some(index) => FieldResponse::Value(options[index].clone()),
                    None => FieldResponse::Back,
                })
            }
            FieldKind::Toggle => {
                let answer = Confirm::with_theme(self.theme)
                    .with_prompt(prompt.field.label)
                    .default(prompt.current.as_flag().unwrap_or(false))
                    .interact_opt()?;
                Ok(match answer {
                    Some(true) => FieldResponse::Value("yes".into()),
                    Some(false) => FieldResponse::Value("no".into()),
                    None => FieldResponse::Back,
                })
            }
            FieldKind::Text | FieldKind::Number | FieldKind::Stepper(_) => {
                let line = Input::<String>::with_theme(self.theme)
                    .with_prompt(prompt.label_line())
                    .allow_empty(true)
                    .interact_text()?;
                Ok(parse_field_command(&line, prompt.is_stepper()))
            }
        }
    }

    fn choose_action(&mut self, step: usize, total: usize) -> Result<StepAction, CliError> {
        let actions: &[(&str, StepAction)] = if step == total {
            &[
                ("Submit", StepAction::Submit),
                ("Back", StepAction::Back),
                ("Cancel", StepAction::Cancel),
            ]
        } else {
            &[
                ("Next", StepAction::Next),
                ("Back", StepAction::Back),
                ("Cancel", StepAction::Cancel),
            ]
        };
        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let choice = Select::with_theme(self.theme)
            .with_prompt(format!("Step {} of {}", step, total))
            .items(labels.as_slice())
            .default(0)
            .interact_opt()?;
        Ok(choice.map_or(StepAction::Back, |index| actions[index].1))
    }
}

/// Line-oriented answers for script mode. End of input cancels the wizard.
pub struct ScriptedInteraction<'a> {
    input: &'a mut ScriptInput,
}

impl<'a> ScriptedInteraction<'a> {
    pub fn new(input: &'a mut ScriptInput) -> Self {
        Self { input }
    }
}

impl WizardInteraction for ScriptedInteraction<'_> {
    fn prompt_field(&mut self, prompt: &FieldPrompt<'_>) -> Result<FieldResponse, CliError> {
        output::prompt(prompt.label_line());
        Ok(match self.input.next_line()? {
            Some(line) => parse_field_command(&line, prompt.is_stepper()),
            None => FieldResponse::Cancel,
        })
    }

    fn choose_action(&mut self, step: usize, total: usize) -> Result<StepAction, CliError> {
        let last_step = step == total;
        loop {
            output::prompt(if last_step {
                "Action (submit/back/cancel)"
            } else {
                "Action (next/back/cancel)"
            });
            let Some(line) = self.input.next_line()? else {
                return Ok(StepAction::Cancel);
            };
            match parse_step_action(&line, last_step) {
                Some(action) => return Ok(action),
                None => output::warning(format!("Unknown action `{}`.", line.trim())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::wizard::{FieldKind, StepperField};

    #[test]
    fn field_commands() {
        assert_eq!(parse_field_command("", false), FieldResponse::Keep);
        assert_eq!(parse_field_command("  ", true), FieldResponse::Keep);
        assert_eq!(parse_field_command(":back", false), FieldResponse::Back);
        assert_eq!(parse_field_command(":cancel", true), FieldResponse::Cancel);
        assert_eq!(parse_field_command(":clear", false), FieldResponse::Clear);
        assert_eq!(parse_field_command("+", true), FieldResponse::Increment);
        assert_eq!(parse_field_command("-", true), FieldResponse::Decrement);
        assert_eq!(
            parse_field_command("-", false),
            FieldResponse::Value("-".into())
        );
        assert_eq!(
            parse_field_command(" 6.5 ", true),
            FieldResponse::Value("6.5".into())
        );
    }

    #[test]
    fn step_actions() {
        assert_eq!(parse_step_action("", false), Some(StepAction::Next));
        assert_eq!(parse_step_action("", true), Some(StepAction::Submit));
        assert_eq!(parse_step_action("BACK", false), Some(StepAction::Back));
        assert_eq!(parse_step_action("q", true), Some(StepAction::Cancel));
        assert_eq!(parse_step_action("later", false), None);
    }

    #[test]
    fn label_line_shows_range_and_current_value() {
        let field = FieldDescriptor::new(
            "soilPh",
            "Soil pH",
            1,
            FieldKind::Stepper(StepperField::new(4.0, 9.0, 0.5)),
        )
        .with_required();
        let current = FieldValue::from("6.5");
        let prompt = FieldPrompt {
            field: &field,
            current: &current,
        };
        assert_eq!(prompt.label_line(), "Soil pH (4–9, +/-)* [6.5]");
    }

    #[test]
    fn scripted_interaction_skips_unknown_actions_and_cancels_at_eof() {
        let mut input = ScriptInput::new(Box::new(Cursor::new("later\nback\n")));
        let mut interaction = ScriptedInteraction::new(&mut input);
        assert_eq!(interaction.choose_action(2, 3).unwrap(), StepAction::Back);
        assert_eq!(interaction.choose_action(2, 3).unwrap(), StepAction::Cancel);
    }
}
