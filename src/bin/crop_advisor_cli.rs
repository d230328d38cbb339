use std::{env, process};

use crop_advisor::{cli::run_cli, init, location::default_resolver};

fn main() {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None => run_cli().map_err(|err| err.to_string()),
        Some("resolve") => resolve(&args[1..]),
        Some("-h") | Some("--help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown argument `{other}`.");
            print_usage();
            process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// One-shot lookup: prints the canonical state, exits with 1 when nothing matches.
fn resolve(args: &[String]) -> Result<(), String> {
    let input = args.join(" ");
    if input.trim().is_empty() {
        return Err("usage: crop_advisor_cli resolve <region name>".into());
    }
    match default_resolver().resolve_str(&input) {
        Some(state) => {
            println!("{state}");
            Ok(())
        }
        None => Err(format!("no state matches `{}`", input.trim())),
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  crop_advisor_cli                   start the interactive shell");
    eprintln!("  crop_advisor_cli resolve <region>  print the canonical state name");
    eprintln!();
    eprintln!("Set CROP_ADVISOR_CLI_SCRIPT=1 to read shell commands from stdin.");
}
