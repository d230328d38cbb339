use std::io::{self, BufRead};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::errors::{AdvisorError, CliError, SubmitError, WizardError};
use crate::location::{default_resolver, LocationResolver};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<AdvisorError> for CommandError {
    fn from(err: AdvisorError) -> Self {
        CommandError::Cli(err.into())
    }
}

impl From<WizardError> for CommandError {
    fn from(err: WizardError) -> Self {
        CommandError::Cli(err.into())
    }
}

impl From<SubmitError> for CommandError {
    fn from(err: SubmitError) -> Self {
        CommandError::Cli(err.into())
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Cli(err.into())
    }
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Cli(err.into())
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Line source for script mode, shared by the shell loop and wizard prompts
/// so both consume the same stream in order.
pub struct ScriptInput {
    reader: Box<dyn BufRead>,
}

impl ScriptInput {
    pub fn new(reader: Box<dyn BufRead>) -> Self {
        Self { reader }
    }

    pub fn stdin() -> Self {
        Self::new(Box::new(io::BufReader::new(io::stdin())))
    }

    /// Next line without its terminator, `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub resolver: &'static LocationResolver,
    pub script: Option<ScriptInput>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load_effective()?;
        let script = match mode {
            CliMode::Script => Some(ScriptInput::stdin()),
            CliMode::Interactive => None,
        };
        Ok(Self::with_parts(mode, config_manager, config, script))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        script: Option<ScriptInput>,
    ) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            resolver: default_resolver(),
            script,
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        "crop-advisor> ".to_string()
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|definition| definition.handler) else {
            output::warning(format!("Unknown command `{}`.", raw));
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::detail("Use `help <command>` for usage details.");
            }
            CommandError::Cli(err) => {
                tracing::debug!(error = %err, "command failed");
                output::error(err);
            }
        }
    }

    pub(crate) fn persist_config(&self) -> Result<(), AdvisorError> {
        self.config_manager.save(&self.config)
    }
}
