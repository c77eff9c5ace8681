use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use colored::Colorize;
use super::OutputFormat;
use crate::{Preprocessor,STDRESULT};

pub fn table(cmd: &clap::ArgMatches) -> STDRESULT {
    let functions = super::get_functions(cmd,"table")?;
    let mut prep = Preprocessor::new();
    prep.set_config(super::get_settings(cmd)?);
    let fmt = match cmd.get_one::<String>("format") {
        Some(s) => OutputFormat::from_str(s)?,
        None => OutputFormat::Csv
    };
    let glossary_path = cmd.get_one::<String>("glossary").map(|s| Path::new(s));
    let (vocab,sequences) = prep.tokenize_instructions(&functions);
    let assignment = prep.token_categorizer(&vocab,glossary_path)?;
    if assignment.is_insufficient() {
        eprintln!("{} the glossary is too short to classify all {} mnemonics in the dataset","notice:".yellow().bold(),vocab.len());
    }
    let table = prep.assembly_dataframer(&sequences,&assignment)?;
    if table.len() < functions.len() {
        eprintln!("{} {} of {} functions had no categorized tokens and were dropped","notice:".yellow().bold(),
            functions.len()-table.len(),functions.len());
    }
    match fmt {
        OutputFormat::Csv => print!("{}",table.to_csv()),
        OutputFormat::Json => println!("{}",table.to_json(cmd.get_one::<u16>("indent").copied()))
    }
    return Ok(());
}

pub fn vocab(cmd: &clap::ArgMatches) -> STDRESULT {
    let functions = super::get_functions(cmd,"vocab")?;
    let mut prep = Preprocessor::new();
    prep.set_config(super::get_settings(cmd)?);
    let (vocab,sequences) = prep.tokenize_instructions(&functions);
    let mut totals: HashMap<&str,usize> = HashMap::new();
    for tok in sequences.iter().flatten() {
        *totals.entry(tok.as_str()).or_insert(0) += 1;
    }
    let mut obj = json::JsonValue::new_object();
    for mnemonic in &vocab {
        obj[mnemonic.as_str()] = totals.get(mnemonic.as_str()).copied().unwrap_or(0).into();
    }
    let s = match cmd.get_one::<u16>("indent") {
        Some(spaces) => json::stringify_pretty(obj,*spaces),
        None => json::stringify(obj)
    };
    println!("{}",s);
    return Ok(());
}
