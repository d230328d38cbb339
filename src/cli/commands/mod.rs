pub mod config;
pub mod region;
pub mod system;
pub mod wizard;

use crate::cli::context::{CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(wizard::definitions());
    commands.extend(region::definitions());
    commands.extend(config::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// A shell command: its name, help text and handler.
#[derive(Clone, Copy)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }

    /// Usage text after the command name, e.g. `<region name>` for `resolve`.
    pub fn arguments(&self) -> &'static str {
        self.usage
            .strip_prefix(self.name)
            .map(str::trim_start)
            .unwrap_or_default()
    }
}

/// Commands in declaration order; the shell has only a handful, so lookup
/// is a scan.
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands: Vec<CommandDefinition> = Vec::with_capacity(definitions.len());
        for definition in definitions {
            match commands.iter_mut().find(|known| known.name == definition.name) {
                Some(known) => *known = definition,
                None => commands.push(definition),
            }
        }
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|command| command.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_declaration_order() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            ["version", "help", "exit", "wizard", "resolve", "states", "config"]
        );
        assert!(registry.get("resolve").is_some());
        assert!(registry.get("ledger").is_none());
    }

    #[test]
    fn arguments_follow_the_command_name() {
        let registry = CommandRegistry::new(all_definitions());
        let arguments = |name: &str| registry.get(name).map(CommandDefinition::arguments);
        assert_eq!(arguments("resolve"), Some("<region name>"));
        assert_eq!(arguments("config"), Some("[show|set <key> <value>]"));
        assert_eq!(arguments("exit"), Some(""));
    }
}
