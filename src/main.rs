//! # Command Line Interface
//!
//! The command tree is built in `cli.rs`, the subcommands are run from the `commands` module.

mod cli;

use env_logger;
#[cfg(windows)]
use colored;
use log::error;
use asmprep::commands;
use asmprep::commands::CommandError;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);
    let main_cmd = cli::build_cli();
    let matches = main_cmd.get_matches();

    // Feature table
    if let Some(cmd) = matches.subcommand_matches("table") {
        return commands::table::table(cmd);
    }

    // Vocabulary with totals
    if let Some(cmd) = matches.subcommand_matches("vocab") {
        return commands::table::vocab(cmd);
    }

    // Built-in glossary as text
    if let Some(cmd) = matches.subcommand_matches("glossary") {
        return commands::glossary::glossary(cmd);
    }

    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(cli::build_cli(),cmd);
    }

    error!("No subcommand was found, try `asmprep --help`");
    return Err(Box::new(CommandError::InvalidCommand));
}
