use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::CONFIG_KEYS;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and manage preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 2 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            context.config.set(&key, &value)?;
            context.persist_config()?;
            output::success(format!("Updated `{}`.", key));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`; expected show or set",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for line in context.config.describe() {
        output::info(format!("  {}", line));
    }
    output::detail(format!("Stored at {}", context.config_manager.path().display()));
    Ok(())
}
