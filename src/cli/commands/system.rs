use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

use super::{CommandDefinition, CommandRegistry};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Crop Advisor {}", env!("CARGO_PKG_VERSION")));
    output::info(format!("  Build hash   : {}", env!("CROP_ADVISOR_BUILD_HASH")));
    output::info(format!("  Built at     : {}", env!("CROP_ADVISOR_BUILD_TIMESTAMP")));
    output::info(format!("  Profile      : {}", env!("CROP_ADVISOR_BUILD_PROFILE")));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(command) => {
                output::section(format!("Help: {}", command.name));
                output::info(format!("  Description: {}", command.description));
                output::info(format!("  Usage: {}", command.usage));
            }
            None => {
                output::warning(format!("Unknown command `{}`.", args[0]));
                context.suggest_command(args[0]);
            }
        }
        return Ok(());
    }

    print_overview(&context.registry);
    Ok(())
}

fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for command in registry.iter() {
        output::info(format!("  {:<10} {}", command.name, command.description));
    }
    output::info("Use `help <command>` for details.");
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
