//! # `asmprep` main library
//!
//! This library turns disassembled functions into fixed-width feature vectors.
//! Each function becomes a row of a table, and each column holds the share of the function's
//! instructions that fall into one category, e.g., data transfer or arithmetic.
//!
//! ## Architecture
//!
//! The pipeline has three stages, each in its own module:
//! * `tokenizer` extracts mnemonics and builds the vocabulary of distinct mnemonics
//! * `categorizer` maps the vocabulary onto the categories of a glossary
//! * `aggregator` counts categorized mnemonics per function and normalizes each row
//!
//! Glossaries come from the `glossary` module, either the built-in x86-64 glossary,
//! some other `GlossaryProvider`, or a plain text file.
//! The `Preprocessor` owns a glossary and `Settings` and runs the stages in order.
//!
//! ```
//! let functions = ["'push rbp''mov rbp, rsp''pop rbp''ret'"];
//! let table = asmprep::complete_preprocessing(&functions,None).expect("no features");
//! assert_eq!(table.column("Stack instructions"),Some(vec![0.5]));
//! ```

pub mod tokenizer;
pub mod glossary;
pub mod categorizer;
pub mod aggregator;
pub mod settings;
pub mod commands;

#[cfg(test)]
mod tokenize_test;
#[cfg(test)]
mod categorize_test;

use std::path::Path;
use aggregator::{Aggregator,FeatureTable};
use categorizer::CategoryAssignment;
use glossary::{Glossary,GlossaryProvider};
use settings::Settings;
use tokenizer::{Tokenizer,TokenSequence,Vocabulary};

pub type DYNERR = Box<dyn std::error::Error>;
pub type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Runs the preprocessing stages against an explicitly chosen glossary.
pub struct Preprocessor {
    glossary: Box<dyn GlossaryProvider>,
    settings: Settings
}

impl Preprocessor {
    /// Create a `Preprocessor` with the built-in glossary and default settings
    pub fn new() -> Self {
        Self::with_glossary(Box::new(Glossary::builtin()))
    }
    /// Create a `Preprocessor` using `glossary` whenever no glossary file is given
    pub fn with_glossary(glossary: Box<dyn GlossaryProvider>) -> Self {
        Self {
            glossary,
            settings: Settings::new()
        }
    }
    pub fn set_config(&mut self,settings: Settings) {
        self.settings = settings;
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    /// Get the vocabulary and the token sequence of each function
    pub fn tokenize_instructions<S: AsRef<str>>(&self,functions: &[S]) -> (Vocabulary,Vec<TokenSequence>) {
        let mut tokenizer = Tokenizer::new();
        tokenizer.set_config(&self.settings);
        tokenizer.tokenize(functions)
    }
    /// Assign the vocabulary to categories.
    /// If `glossary_path` is given the text glossary is used, otherwise the glossary this object owns.
    pub fn token_categorizer(&self,vocab: &Vocabulary,glossary_path: Option<&Path>) -> Result<CategoryAssignment,DYNERR> {
        match glossary_path {
            Some(path) => categorizer::categorize_file(vocab,path),
            None => Ok(categorizer::categorize_provider(vocab,self.glossary.as_ref())?)
        }
    }
    /// Build the table of category shares
    pub fn assembly_dataframer(&self,sequences: &[TokenSequence],assignment: &CategoryAssignment) -> Result<FeatureTable,DYNERR> {
        let mut aggregator = Aggregator::new();
        aggregator.set_config(&self.settings);
        Ok(aggregator.aggregate(sequences,assignment)?)
    }
    /// Tokenize, categorize, and aggregate in one go
    pub fn complete_preprocessing<S: AsRef<str>>(&self,functions: &[S],glossary_path: Option<&Path>) -> Result<FeatureTable,DYNERR> {
        let (vocab,sequences) = self.tokenize_instructions(functions);
        let assignment = self.token_categorizer(&vocab,glossary_path)?;
        self.assembly_dataframer(&sequences,&assignment)
    }
}

/// Tokenize with default settings
pub fn tokenize_instructions<S: AsRef<str>>(functions: &[S]) -> (Vocabulary,Vec<TokenSequence>) {
    Tokenizer::new().tokenize(functions)
}

/// Categorize with the text glossary at `glossary_path`, or the built-in glossary if None
pub fn token_categorizer(vocab: &Vocabulary,glossary_path: Option<&Path>) -> Result<CategoryAssignment,DYNERR> {
    match glossary_path {
        Some(path) => categorizer::categorize_file(vocab,path),
        None => Ok(categorizer::categorize_provider(vocab,&Glossary::builtin())?)
    }
}

/// Aggregate with default settings
pub fn assembly_dataframer(sequences: &[TokenSequence],assignment: &CategoryAssignment) -> Result<FeatureTable,DYNERR> {
    Ok(Aggregator::new().aggregate(sequences,assignment)?)
}

/// Run the whole pipeline with default settings
pub fn complete_preprocessing<S: AsRef<str>>(functions: &[S],glossary_path: Option<&Path>) -> Result<FeatureTable,DYNERR> {
    Preprocessor::new().complete_preprocessing(functions,glossary_path)
}
