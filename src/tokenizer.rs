//! # Mnemonic tokenizer
//!
//! Each function arrives as one string in which the instructions are wrapped in a delimiter,
//! typically the single quote of a printed list, e.g. `['push rbp', 'mov rbp, rsp']`.
//! The tokenizer keeps only the mnemonic of each instruction, i.e., the text up to the first space.
//! Splitting on the delimiter also produces the list punctuation as fragments, these are
//! recognized by their first word and dropped.

use std::collections::HashSet;
use crate::settings::Settings;

/// The mnemonics of one function in instruction order, duplicates included.
pub type TokenSequence = Vec<String>;

/// Distinct mnemonics in the order they were first seen.
#[derive(Clone,Debug,PartialEq)]
pub struct Vocabulary {
    order: Vec<String>,
    members: HashSet<String>
}

impl Vocabulary {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            members: HashSet::new()
        }
    }
    /// Add the mnemonic if it is new, returns true if it was added.
    pub fn insert(&mut self,mnemonic: &str) -> bool {
        if self.members.contains(mnemonic) {
            return false;
        }
        self.members.insert(mnemonic.to_string());
        self.order.push(mnemonic.to_string());
        true
    }
    pub fn contains(&self,mnemonic: &str) -> bool {
        self.members.contains(mnemonic)
    }
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// Iterate in first-seen order
    pub fn iter(&self) -> std::slice::Iter<'_,String> {
        self.order.iter()
    }
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ans = Self::new();
        for m in iter {
            ans.insert(m.as_ref());
        }
        ans
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a,String>;
    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Extracts mnemonics from delimited instruction lists.
pub struct Tokenizer {
    delimiter: char,
    noise: Vec<String>
}

impl Tokenizer {
    /// Create a `Tokenizer` that splits on `'` and drops `[`, `]`, and `,`
    pub fn new() -> Self {
        let settings = Settings::new();
        Self {
            delimiter: settings.tokenizer.delimiter,
            noise: settings.tokenizer.noise
        }
    }
    pub fn set_config(&mut self,settings: &Settings) {
        self.delimiter = settings.tokenizer.delimiter;
        self.noise = settings.tokenizer.noise.clone();
    }
    /// Mnemonic of a single fragment, or None if the fragment is punctuation or blank
    fn mnemonic<'a>(&self,fragment: &'a str) -> Option<&'a str> {
        let candidate = match fragment.split_once(' ') {
            Some((first,_)) => first,
            None => fragment
        };
        if candidate.is_empty() || self.noise.iter().any(|n| n==candidate) {
            log::trace!("skip fragment `{}`",fragment);
            return None;
        }
        Some(candidate)
    }
    /// Tokenize one function, adding any new mnemonics to `vocab`.
    pub fn tokenize_function(&self,function: &str,vocab: &mut Vocabulary) -> TokenSequence {
        let mut ans = TokenSequence::new();
        for fragment in function.split(self.delimiter) {
            if let Some(mnemonic) = self.mnemonic(fragment) {
                vocab.insert(mnemonic);
                ans.push(mnemonic.to_string());
            }
        }
        ans
    }
    /// Tokenize all the functions, returning the global vocabulary and one token sequence per function.
    pub fn tokenize<S: AsRef<str>>(&self,functions: &[S]) -> (Vocabulary,Vec<TokenSequence>) {
        let mut vocab = Vocabulary::new();
        let sequences: Vec<TokenSequence> = functions.iter()
            .map(|f| self.tokenize_function(f.as_ref(),&mut vocab))
            .collect();
        log::debug!("{} functions gave {} distinct mnemonics",sequences.len(),vocab.len());
        (vocab,sequences)
    }
}
