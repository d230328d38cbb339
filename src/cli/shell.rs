use std::borrow::Cow;

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::config::{ConfigManager, CONFIG_KEYS};
use crate::errors::CliError;

use super::commands::CommandRegistry;
use super::context::{CliMode, CommandError, LoopControl, ShellContext};
use super::output::{self, OutputPreferences};

pub const SCRIPT_ENV: &str = "CROP_ADVISOR_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    if mode == CliMode::Script {
        output::set_preferences(OutputPreferences { plain: true });
    }

    let mut context = ShellContext::new(mode, ConfigManager::new()?)?;
    tracing::debug!(?mode, config = %context.config_manager.path().display(), "shell starting");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(&context.registry);
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::section("Crop Advisor");
    output::info("Type `wizard` to enter farm details or `help` for all commands.");

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    while context.running {
        let Some(line) = next_script_line(context)? else {
            break;
        };
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn next_script_line(context: &mut ShellContext) -> Result<Option<String>, CliError> {
    match context.script.as_mut() {
        Some(script) => script.next_line(),
        None => Ok(None),
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() || tokens[0].starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Line editor support: completes command names, `config` subcommands and
/// setting keys, and hints a command's arguments once its name is typed.
struct CommandHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandHelper {
    fn new(registry: &CommandRegistry) -> Self {
        let mut commands: Vec<_> = registry
            .iter()
            .map(|command| (command.name, command.arguments()))
            .collect();
        commands.sort_by_key(|(name, _)| *name);
        Self { commands }
    }

    fn candidates(&self, previous: &[&str]) -> Vec<&'static str> {
        match previous {
            [] | ["help"] => self.commands.iter().map(|(name, _)| *name).collect(),
            ["config"] => vec!["set", "show"],
            ["config", "set"] => CONFIG_KEYS.to_vec(),
            _ => Vec::new(),
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let word_start = before
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let word = before[word_start..].to_ascii_lowercase();
        let previous: Vec<String> = before[..word_start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let previous: Vec<&str> = previous.iter().map(String::as_str).collect();

        let matches = self
            .candidates(&previous)
            .into_iter()
            .filter(|candidate| candidate.starts_with(&word))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect();
        Ok((word_start, matches))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let typed = line.trim_start().to_ascii_lowercase();
        self.commands
            .iter()
            .find(|(name, arguments)| *name == typed && !arguments.is_empty())
            .map(|(_, arguments)| format!(" {}", arguments))
    }
}

impl Highlighter for CommandHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(
    input: &str,
) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use tempfile::tempdir;

    use crate::cli::commands::all_definitions;
    use crate::cli::context::ScriptInput;
    use crate::config::Config;

    fn script_context(dir: &std::path::Path, input: &str) -> ShellContext {
        let manager = ConfigManager::with_base_dir(dir.to_path_buf()).unwrap();
        ShellContext::with_parts(
            CliMode::Script,
            manager,
            Config::default(),
            Some(ScriptInput::new(Box::new(Cursor::new(input.to_string())))),
        )
    }

    #[test]
    fn parses_quoted_arguments() {
        let tokens = parse_command_line("resolve \"Tamil Nadu\"").unwrap();
        assert_eq!(tokens, vec!["resolve", "Tamil Nadu"]);
        assert!(parse_command_line("resolve \"open").is_err());
    }

    #[test]
    fn exit_stops_the_script() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path(), "states\nexit\nconfig set language hi\n");
        run_script(&mut context).unwrap();
        assert!(!context.running);
        assert_eq!(context.last_command.as_deref(), Some("exit"));
        assert_eq!(context.config.language, "en");
    }

    #[test]
    fn config_set_is_persisted() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path(), "config set policy retry:2\n# comment\n");
        run_script(&mut context).unwrap();
        let stored = context.config_manager.load().unwrap();
        assert_eq!(stored.save_failure_policy.to_string(), "retry:2");
    }

    #[test]
    fn unknown_commands_and_bad_arguments_do_not_abort() {
        let dir = tempdir().unwrap();
        let mut context =
            script_context(dir.path(), "resolv Kerala\nconfig set timeout zero\nresolve Kerala\n");
        run_script(&mut context).unwrap();
        assert!(context.running);
        assert_eq!(context.last_command.as_deref(), Some("resolve Kerala"));
    }

    fn helper() -> CommandHelper {
        CommandHelper::new(&CommandRegistry::new(all_definitions()))
    }

    fn complete(line: &str) -> (usize, Vec<String>) {
        let helper = helper();
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (start, pairs) = helper.complete(line, line.len(), &ctx).unwrap();
        (start, pairs.into_iter().map(|pair| pair.replacement).collect())
    }

    #[test]
    fn completes_commands_subcommands_and_keys() {
        assert_eq!(complete("re"), (0, vec!["resolve".to_string()]));
        assert_eq!(complete("help w"), (5, vec!["wizard".to_string()]));
        assert_eq!(
            complete("config s"),
            (7, vec!["set".to_string(), "show".to_string()])
        );
        assert_eq!(complete("config set p"), (11, vec!["policy".to_string()]));
        assert_eq!(complete("resolve ka"), (8, Vec::<String>::new()));
    }

    #[test]
    fn hints_arguments_after_a_full_command_name() {
        let helper = helper();
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        assert_eq!(
            helper.hint("resolve", 7, &ctx).as_deref(),
            Some(" <region name>")
        );
        assert_eq!(helper.hint("exit", 4, &ctx), None);
        assert_eq!(helper.hint("reso", 4, &ctx), None);
    }
}
