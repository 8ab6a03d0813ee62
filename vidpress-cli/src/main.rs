// vidpress-cli/src/main.rs
//
// Entry point for the vidpress command-line tool. Parses arguments, sets up
// logging, and dispatches to the subcommand implementations.

use clap::Parser;
use console::style;
use std::process;

mod cli;
mod commands;
mod config;
mod logging;
mod progress;

fn main() {
    logging::init();

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Convert(args) => commands::convert::run_convert(args),
        cli::Commands::History(args) => commands::history::run_history(args),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", style("Error:").red().bold());
        process::exit(1);
    }
}
