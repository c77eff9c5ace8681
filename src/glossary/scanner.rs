//! Single pass scanner for plain text glossaries.
//!
//! The scanner is a small state machine.  Until the first marker line no category is open,
//! afterwards mnemonic lines are appended to the most recently opened category at the next position.
//! The scanner keeps every mnemonic it sees, matching against a vocabulary is up to the caller.

use std::path::Path;
use super::Error;
use crate::DYNERR;

/// A category as written in a text glossary, mnemonics are in file order
#[derive(Clone,Debug,PartialEq)]
pub struct TextCategory {
    pub name: String,
    pub mnemonics: Vec<String>
}

/// Result of scanning a text glossary
#[derive(Clone,Debug,PartialEq)]
pub struct TextGlossary {
    pub marker: char,
    /// categories in order of first appearance
    pub categories: Vec<TextCategory>,
    /// total count of lines, including blank ones
    pub lines: usize,
    /// count of lines that contained the marker
    pub marker_lines: usize
}

impl TextGlossary {
    /// Number of lines that could hold a mnemonic
    pub fn mnemonic_lines(&self) -> usize {
        self.lines - self.marker_lines
    }
}

#[derive(Clone,Copy)]
enum State {
    Closed,
    Open { category: usize, position: usize }
}

pub struct Scanner {
    marker: char,
    state: State,
    categories: Vec<TextCategory>,
    lines: usize,
    marker_lines: usize
}

impl Scanner {
    /// Create a scanner, the marker cannot be whitespace
    pub fn new(marker: char) -> Result<Self,Error> {
        if marker.is_whitespace() {
            return Err(Error::MissingMarker);
        }
        Ok(Self {
            marker,
            state: State::Closed,
            categories: Vec::new(),
            lines: 0,
            marker_lines: 0
        })
    }
    fn open(&mut self,line: &str) {
        let name: String = line.chars().filter(|c| *c!=self.marker).collect();
        let category = match self.categories.iter().position(|c| c.name==name) {
            Some(idx) => {
                log::debug!("category `{}` reopened",name);
                idx
            },
            None => {
                self.categories.push(TextCategory { name, mnemonics: Vec::new() });
                self.categories.len() - 1
            }
        };
        let position = self.categories[category].mnemonics.len();
        self.state = State::Open { category, position };
    }
    fn append(&mut self,line: &str) {
        let mnemonic: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if mnemonic.is_empty() {
            return;
        }
        match self.state {
            State::Closed => log::warn!("glossary mnemonic `{}` precedes any category",mnemonic),
            State::Open { category, position } => {
                log::trace!("`{}` at position {} of category {}",mnemonic,position,category);
                self.categories[category].mnemonics.push(mnemonic);
                self.state = State::Open { category, position: position + 1 };
            }
        }
    }
    /// Process one line, the line ending should already be removed
    pub fn feed(&mut self,line: &str) {
        self.lines += 1;
        if line.contains(self.marker) {
            self.marker_lines += 1;
            self.open(line);
        } else {
            self.append(line);
        }
    }
    pub fn finish(self) -> TextGlossary {
        TextGlossary {
            marker: self.marker,
            categories: self.categories,
            lines: self.lines,
            marker_lines: self.marker_lines
        }
    }
}

/// Scan glossary text, the marker is the first character of the text.
pub fn scan(text: &str) -> Result<TextGlossary,Error> {
    let marker = match text.chars().next() {
        Some(c) => c,
        None => return Err(Error::EmptyGlossary)
    };
    let mut scanner = Scanner::new(marker)?;
    for line in text.lines() {
        scanner.feed(line);
    }
    Ok(scanner.finish())
}

/// Read and scan a glossary file
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<TextGlossary,DYNERR> {
    let text = match std::fs::read_to_string(path.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("could not read glossary {}",path.as_ref().display());
            return Err(Box::new(e));
        }
    };
    Ok(scan(&text)?)
}
