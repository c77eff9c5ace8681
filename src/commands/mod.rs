//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod table;
pub mod glossary;
pub mod completions;

use std::io::Read;
use std::str::FromStr;
use log::error;
use crate::settings::{self,Settings};
use crate::DYNERR;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("Output format is unknown")]
    UnknownFormat,
    #[error("No functions were received")]
    NoInput,
    #[error("File not found")]
    FileNotFound
}

/// Formats in which the feature table can be written
#[derive(PartialEq,Clone,Copy,Debug)]
pub enum OutputFormat {
    Csv,
    Json
}

impl FromStr for OutputFormat {
    type Err = CommandError;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(CommandError::UnknownFormat)
        }
    }
}

/// Settings from the `config` argument, or defaults if there is none
pub fn get_settings(cmd: &clap::ArgMatches) -> Result<Settings,DYNERR> {
    match cmd.get_one::<String>("config") {
        Some(json) => match settings::parse(json) {
            Ok(s) => Ok(s),
            Err(e) => {
                error!("could not interpret the config string");
                Err(e)
            }
        },
        None => Ok(Settings::new())
    }
}

/// Read the functions, one per line, from the `file` argument or from a pipe.
/// Blank lines are skipped.
pub fn get_functions(cmd: &clap::ArgMatches,subcommand: &str) -> Result<Vec<String>,DYNERR> {
    let mut text = String::new();
    match cmd.get_one::<String>("file") {
        Some(path) => {
            if !std::path::Path::new(path).exists() {
                error!("could not find {}",path);
                return Err(Box::new(CommandError::FileNotFound));
            }
            text = std::fs::read_to_string(path)?;
        },
        None => {
            if atty::is(atty::Stream::Stdin) {
                error!("line entry is not supported for `{}`, please pipe something in or use `--file`",subcommand);
                return Err(Box::new(CommandError::InvalidCommand));
            }
            if let Err(e) = std::io::stdin().read_to_string(&mut text) {
                error!("the input could not be interpreted as a string");
                return Err(Box::new(e));
            }
        }
    }
    let functions: Vec<String> = text.lines().filter(|l| l.trim().len()>0).map(|l| l.to_string()).collect();
    if functions.len()==0 {
        error!("{} did not receive any functions",subcommand);
        return Err(Box::new(CommandError::NoInput));
    }
    log::info!("{} functions received",functions.len());
    Ok(functions)
}
