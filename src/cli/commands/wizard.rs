use chrono::Utc;

use crate::api::ApiClient;
use crate::cli::context::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::interaction::{DialoguerInteraction, ScriptedInteraction, WizardInteraction};
use crate::cli::output;
use crate::cli::runner::{WizardResult, WizardRunner};
use crate::wizard::{apply_location_hint, farm_details_form_for, FormWizardEngine, SubmitOutcome};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "wizard",
        "Enter farm details step by step and save them",
        "wizard",
        cmd_wizard,
    )]
}

fn cmd_wizard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: wizard".into()));
    }

    let mut engine = FormWizardEngine::new(farm_details_form_for(context.resolver))?;
    if let Some(hint) = context.config.location_hint.as_deref() {
        match apply_location_hint(&mut engine, context.resolver, Some(hint)) {
            Some(state) => output::info(format!("State prefilled from `{}`: {}", hint, state)),
            None => output::warning(format!(
                "Location `{}` did not match a state; enter it by hand.",
                hint
            )),
        }
    }

    let store = ApiClient::new(&context.config.api_settings())?;
    let mut runner = WizardRunner::new(engine, context.resolver, context.config.save_failure_policy);

    let result = match context.mode {
        CliMode::Script => {
            let Some(script) = context.script.as_mut() else {
                return Err(CommandError::InvalidArguments(
                    "script input is not available".into(),
                ));
            };
            run_with(&mut runner, &mut ScriptedInteraction::new(script), &store)?
        }
        CliMode::Interactive => {
            output::detail("Enter keeps a value, `:back` returns, `:cancel` stops, +/- steps numbers.");
            run_with(&mut runner, &mut DialoguerInteraction::new(&context.theme), &store)?
        }
    };

    match result {
        WizardResult::Cancelled => {}
        WizardResult::Submitted(SubmitOutcome::Saved { attempts }) => {
            tracing::info!(attempts, "farm profile saved");
            output::success("Farm details saved.");
            context.config.last_farm_save = Some(Utc::now());
            context.persist_config()?;
        }
        WizardResult::Submitted(SubmitOutcome::ProceededWithoutSaving(err)) => {
            output::warning(format!("Could not save farm details: {}", err));
            output::warning("Continuing without saving.");
        }
    }
    Ok(())
}

fn run_with(
    runner: &mut WizardRunner<'_>,
    interaction: &mut dyn WizardInteraction,
    store: &ApiClient,
) -> Result<WizardResult, CommandError> {
    Ok(runner.run(interaction, store)?)
}
