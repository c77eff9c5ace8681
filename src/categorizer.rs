//! # Category assignment
//!
//! Maps the vocabulary onto the categories of a glossary.  Only mnemonics that actually occur
//! in the vocabulary are assigned, so the assignment is usually much smaller than the glossary.
//! Each assigned mnemonic occupies a slot, addressed by category name and position within the category.

use std::collections::HashMap;
use std::path::Path;
use crate::glossary::GlossaryProvider;
use crate::glossary::scanner::{self,TextGlossary};
use crate::tokenizer::Vocabulary;
use crate::DYNERR;

#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("glossary defines no categories")]
    NoCategories,
    #[error("glossary pair refers to unknown category `{0}`")]
    UnknownCategory(String),
    #[error("glossary lists category `{0}` more than once")]
    DuplicateCategory(String)
}

/// A category and the mnemonics assigned to it, in slot order
#[derive(Clone,Debug,PartialEq)]
pub struct Category {
    pub name: String,
    pub mnemonics: Vec<String>
}

impl Category {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mnemonics: Vec::new()
        }
    }
}

/// Ordered categories with their assigned mnemonics.
/// The category order is the column order of the feature table.
#[derive(Clone,Debug,PartialEq)]
pub struct CategoryAssignment {
    categories: Vec<Category>,
    insufficient: bool
}

impl CategoryAssignment {
    fn new(categories: Vec<Category>) -> Result<Self,Error> {
        if categories.is_empty() {
            log::error!("no categories were found in the glossary");
            return Err(Error::NoCategories);
        }
        Ok(Self {
            categories,
            insufficient: false
        })
    }
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
    pub fn column_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.to_string()).collect()
    }
    /// number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
    /// Mnemonic in the given slot, if any
    pub fn get(&self,category: &str,position: usize) -> Option<&str> {
        self.categories.iter()
            .find(|c| c.name==category)
            .and_then(|c| c.mnemonics.get(position))
            .map(|m| m.as_str())
    }
    /// Visit every occupied slot as ((category,position),mnemonic), in column order
    pub fn iter(&self) -> impl Iterator<Item = ((&str,usize),&str)> {
        self.categories.iter().flat_map(|c| {
            c.mnemonics.iter().enumerate().map(move |(pos,m)| ((c.name.as_str(),pos),m.as_str()))
        })
    }
    /// Total count of occupied slots
    pub fn assigned(&self) -> usize {
        self.categories.iter().map(|c| c.mnemonics.len()).sum()
    }
    /// True if a text glossary had fewer mnemonic lines than the vocabulary has mnemonics
    pub fn is_insufficient(&self) -> bool {
        self.insufficient
    }
}

/// Assign vocabulary mnemonics using a scanned text glossary.
/// Logs a warning, and flags the assignment, if the glossary cannot possibly cover the vocabulary.
pub fn categorize_text(vocab: &Vocabulary,glossary: &TextGlossary) -> Result<CategoryAssignment,Error> {
    let mut categories = Vec::new();
    let mut owner: HashMap<&str,&str> = HashMap::new();
    for text_cat in &glossary.categories {
        let mut cat = Category::new(&text_cat.name);
        for mnemonic in &text_cat.mnemonics {
            if !vocab.contains(mnemonic) {
                continue;
            }
            match owner.get(mnemonic.as_str()) {
                Some(prev) if *prev!=text_cat.name => {
                    log::warn!("`{}` is in categories `{}` and `{}`, only `{}` will count it",mnemonic,prev,text_cat.name,prev);
                },
                Some(_) => {},
                None => {
                    owner.insert(mnemonic.as_str(),text_cat.name.as_str());
                }
            }
            cat.mnemonics.push(mnemonic.to_string());
        }
        categories.push(cat);
    }
    let mut ans = CategoryAssignment::new(categories)?;
    if vocab.len() > glossary.mnemonic_lines() {
        log::warn!("glossary provided is wrong or insufficient to classify the instructions in the dataset");
        log::warn!("glossary has {} mnemonic lines but the dataset has {} mnemonics",glossary.mnemonic_lines(),vocab.len());
        ans.insufficient = true;
    }
    log::debug!("text glossary assigned {} of {} mnemonics",owner.len(),vocab.len());
    Ok(ans)
}

/// Assign vocabulary mnemonics using a glossary file
pub fn categorize_file<P: AsRef<Path>>(vocab: &Vocabulary,path: P) -> Result<CategoryAssignment,DYNERR> {
    let glossary = scanner::scan_file(path)?;
    Ok(categorize_text(vocab,&glossary)?)
}

/// Assign vocabulary mnemonics using a glossary provider.
/// Every category of the provider appears, even if nothing is assigned to it.
pub fn categorize_provider(vocab: &Vocabulary,provider: &dyn GlossaryProvider) -> Result<CategoryAssignment,Error> {
    let mut categories: Vec<Category> = provider.get_categories().iter().map(|name| Category::new(name)).collect();
    let mut index: HashMap<String,usize> = HashMap::new();
    for (i,cat) in categories.iter().enumerate() {
        if index.insert(cat.name.to_string(),i).is_some() {
            log::error!("category `{}` is listed more than once",cat.name);
            return Err(Error::DuplicateCategory(cat.name.to_string()));
        }
    }
    // group consecutive pairs by category
    let mut runs: Vec<(String,Vec<String>)> = Vec::new();
    for (category,mnemonic) in provider.get_dictionary() {
        match runs.last_mut() {
            Some((curr,list)) if *curr==category => list.push(mnemonic),
            _ => runs.push((category,vec![mnemonic]))
        }
    }
    for (category,mnemonics) in runs {
        let idx = match index.get(&category) {
            Some(idx) => *idx,
            None => return Err(Error::UnknownCategory(category))
        };
        for mnemonic in mnemonics {
            if vocab.contains(&mnemonic) {
                log::trace!("assign `{}` to `{}`",mnemonic,category);
                categories[idx].mnemonics.push(mnemonic);
            }
        }
    }
    let ans = CategoryAssignment::new(categories)?;
    log::debug!("glossary provider assigned {} of {} mnemonics",ans.assigned(),vocab.len());
    Ok(ans)
}
