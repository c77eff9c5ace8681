//! # Feature aggregation
//!
//! Turns token sequences into rows of category shares.  For each function the occurrences
//! of every assigned mnemonic are credited to its category, then the row is divided by its own total.
//!
//! A mnemonic is scored at most once per function: the first time it is reached, walking the
//! categories in column order and each category in slot order, all of its instances are counted.
//! Later slots holding the same mnemonic, in the same or another category, are skipped.

use std::collections::{HashMap,HashSet};
use crate::categorizer::CategoryAssignment;
use crate::settings::{Degenerate,Settings};
use crate::tokenizer::TokenSequence;

#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("function {function} has no categorized tokens")]
    NoCategorizedTokens { function: usize }
}

/// One row per function, one column per category
#[derive(Clone,Debug,PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    index: Vec<usize>,
    rows: Vec<Vec<f64>>,
    decimals: u32
}

impl FeatureTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    /// Position of each row's function in the input
    pub fn index(&self) -> &[usize] {
        &self.index
    }
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
    pub fn row(&self,i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(|r| r.as_slice())
    }
    /// Values of the named column, top to bottom
    pub fn column(&self,name: &str) -> Option<Vec<f64>> {
        let j = self.columns.iter().position(|c| c==name)?;
        Some(self.rows.iter().map(|r| r[j]).collect())
    }
    /// number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// CSV with a header, the first column is the function index
    pub fn to_csv(&self) -> String {
        let mut ans = String::from("function");
        for name in &self.columns {
            ans.push(',');
            ans += &csv_field(name);
        }
        ans.push('\n');
        for (idx,row) in self.index.iter().zip(&self.rows) {
            ans += &idx.to_string();
            for val in row {
                ans += &format!(",{:.*}",self.decimals as usize,val);
            }
            ans.push('\n');
        }
        ans
    }
    /// JSON object with `columns`, `index`, and `data` keys
    pub fn to_json(&self,indent: Option<u16>) -> String {
        let mut root = json::JsonValue::new_object();
        root["columns"] = json::JsonValue::from(self.columns.clone());
        root["index"] = json::JsonValue::from(self.index.clone());
        root["data"] = json::JsonValue::from(self.rows.clone());
        if let Some(spaces) = indent {
            json::stringify_pretty(root,spaces)
        } else {
            json::stringify(root)
        }
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',','"','\n','\r']) {
        ["\"",&s.replace('"',"\"\""),"\""].concat()
    } else {
        s.to_string()
    }
}

/// Round to the given number of decimal places.
/// The decimal expansion of `x` itself is rounded, so a share such as 1/40, stored a hair
/// above 0.025, goes up, and exact ties go to even.
fn round_to(x: f64,decimals: u32) -> f64 {
    format!("{:.*}",decimals as usize,x).parse::<f64>().unwrap_or(x)
}

/// Occurrences of assigned mnemonics in one function, per category
pub fn raw_counts(tokens: &TokenSequence,assignment: &CategoryAssignment) -> Vec<usize> {
    let mut tally: HashMap<&str,usize> = HashMap::new();
    for tok in tokens {
        *tally.entry(tok.as_str()).or_insert(0) += 1;
    }
    let mut scored: HashSet<&str> = HashSet::new();
    let mut ans = vec![0;assignment.len()];
    for (i,cat) in assignment.categories().iter().enumerate() {
        for mnemonic in &cat.mnemonics {
            if let Some(n) = tally.get(mnemonic.as_str()) {
                if scored.insert(mnemonic.as_str()) {
                    ans[i] += n;
                }
            }
        }
    }
    ans
}

pub struct Aggregator {
    decimals: u32,
    degenerate: Degenerate
}

impl Aggregator {
    /// Create an `Aggregator` that rounds to 2 places and fails on degenerate rows
    pub fn new() -> Self {
        let settings = Settings::new();
        Self {
            decimals: settings.aggregator.decimals,
            degenerate: settings.aggregator.degenerate
        }
    }
    pub fn set_config(&mut self,settings: &Settings) {
        self.decimals = settings.aggregator.decimals;
        self.degenerate = settings.aggregator.degenerate;
    }
    /// Shares of each category in one function, None if nothing in the function is categorized
    pub fn shares(&self,tokens: &TokenSequence,assignment: &CategoryAssignment) -> Option<Vec<f64>> {
        let counts = raw_counts(tokens,assignment);
        let total: usize = counts.iter().sum();
        if total==0 {
            return None;
        }
        Some(counts.iter().map(|c| round_to(*c as f64 / total as f64,self.decimals)).collect())
    }
    /// Build the feature table, rows follow the order of `sequences`
    pub fn aggregate(&self,sequences: &[TokenSequence],assignment: &CategoryAssignment) -> Result<FeatureTable,Error> {
        let mut index = Vec::new();
        let mut rows = Vec::new();
        for (function,tokens) in sequences.iter().enumerate() {
            match (self.shares(tokens,assignment),self.degenerate) {
                (Some(row),_) => {
                    index.push(function);
                    rows.push(row);
                },
                (None,Degenerate::Drop) => {
                    log::warn!("dropping function {}, it has no categorized tokens",function);
                },
                (None,Degenerate::Error) => {
                    log::error!("function {} has no categorized tokens",function);
                    return Err(Error::NoCategorizedTokens { function });
                }
            }
        }
        log::debug!("feature table has {} rows and {} columns",rows.len(),assignment.len());
        Ok(FeatureTable {
            columns: assignment.column_names(),
            index,
            rows,
            decimals: self.decimals
        })
    }
}
