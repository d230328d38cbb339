use strsim::levenshtein;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::location::{climate_zone, LocationResolver};

use super::CommandDefinition;

const SUGGESTION_DISTANCE: usize = 2;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "resolve",
            "Map a region name onto a canonical state",
            "resolve <region name>",
            cmd_resolve,
        ),
        CommandDefinition::new(
            "states",
            "List canonical states and union territories",
            "states",
            cmd_states,
        ),
    ]
}

fn cmd_resolve(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: resolve <region name>".into(),
        ));
    }
    let input = args.join(" ");
    let input = input.trim();
    match context.resolver.resolve_str(input) {
        Some(state) => {
            output::success(format!("{} -> {}", input, state));
            output::detail(format!("Climate zone: {}", climate_zone(state)));
        }
        None => {
            output::warning(format!("No state matches `{}`.", input));
            match closest_region(context.resolver, input) {
                Some(name) => output::info(format!("Did you mean `{}`?", name)),
                None => output::detail("Use `states` to list the accepted names."),
            }
        }
    }
    Ok(())
}

/// Nearest canonical name by edit distance, for typos the resolver does not
/// catch.
fn closest_region<'r>(resolver: &'r LocationResolver, input: &str) -> Option<&'r str> {
    let needle = input.to_lowercase();
    resolver
        .canonical_names()
        .map(|name| (levenshtein(&name.to_lowercase(), &needle), name))
        .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

fn cmd_states(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("States and union territories");
    for (index, name) in context.resolver.canonical_names().enumerate() {
        output::info(format!("  {:>2}. {}", index + 1, name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::default_resolver;

    #[test]
    fn suggests_near_misses_only() {
        let resolver = default_resolver();
        assert_eq!(closest_region(resolver, "Karnatka"), Some("Karnataka"));
        assert_eq!(closest_region(resolver, "gujrat"), Some("Gujarat"));
        assert_eq!(closest_region(resolver, "PUNE"), None);
        assert_eq!(closest_region(resolver, "Mumbai"), None);
    }
}
