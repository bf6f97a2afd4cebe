pub mod commands;
pub mod handlers;

use clap::{CommandFactory, FromArgMatches};

use commands::{Cli, Commands};
use handlers::{LinkHandler, ListHandler};
use linken_constants::EXAMPLES;

fn examples_help() -> String {
    let width = EXAMPLES.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
    let lines: Vec<String> = EXAMPLES
        .iter()
        .map(|(cmd, desc)| format!("  {cmd:<width$}  {desc}"))
        .collect();
    format!("Examples:\n{}", lines.join("\n"))
}

pub fn run_cli() -> anyhow::Result<()> {
    let matches = Cli::command().after_help(examples_help()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;
    linken_logger::init_logger(cli.quiet);

    match &cli.command {
        Commands::Link(args) => LinkHandler::handle(args, false, cli.debug, cli.quiet),
        Commands::Unlink(args) => LinkHandler::handle(args, true, cli.debug, cli.quiet),
        Commands::List { dests } => ListHandler::handle(dests),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_help_lists_every_example() {
        let help = examples_help();
        assert!(help.starts_with("Examples:"));
        assert_eq!(help.lines().count(), EXAMPLES.len() + 1);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
