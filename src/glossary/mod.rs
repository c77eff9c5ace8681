//! # Instruction glossaries
//!
//! A glossary sorts mnemonics into named categories, and the order of the categories
//! becomes the column order of the feature table.  There are two sources:
//! * a `GlossaryProvider`, the built-in x86-64 `Glossary` is one, it is loaded from JSON at construction
//! * a plain text file, handled by the `scanner` module
//!
//! The text format uses a marker character, which is whatever character the file starts with.
//! Any line containing the marker names a category, other lines are mnemonics, e.g.,
//! ```text
//! *Data transfer instructions*
//! mov
//! movsx
//! *Arithmetic instructions*
//! add
//! ```

pub mod scanner;

use std::collections::HashMap;
use crate::DYNERR;

const JSON_STR: &str = include_str!("x86.json");

#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("glossary is empty")]
    EmptyGlossary,
    #[error("glossary does not start with a category marker")]
    MissingMarker,
    #[error("glossary format is not recognized")]
    Format,
    #[error("mnemonic refers to unknown category `{0}`")]
    UnknownCategory(String),
    #[error("category `{0}` is listed more than once")]
    DuplicateCategory(String),
    #[error("entries for category `{0}` are not contiguous or out of order")]
    CategoryOrder(String),
    #[error("mnemonic `{0}` appears more than once")]
    DuplicateMnemonic(String),
    #[error("marker character collides with `{0}`")]
    MarkerCollision(String)
}

/// Anything that can supply categories and the mnemonics that belong to them.
pub trait GlossaryProvider {
    /// Category names in column order
    fn get_categories(&self) -> Vec<String>;
    /// (category,mnemonic) pairs, grouped by category in the order of `get_categories`
    fn get_dictionary(&self) -> Vec<(String,String)>;
}

/// Validated set of categories and mnemonics
#[derive(Clone,Debug,PartialEq)]
pub struct Glossary {
    categories: Vec<String>,
    dictionary: Vec<(String,String)>
}

impl Glossary {
    /// Build a glossary from its parts.  Category names must be distinct, every pair must name a listed category, the pairs of a
    /// category must be contiguous and follow the category order, and no mnemonic may be listed twice.
    pub fn new(categories: Vec<String>,dictionary: Vec<(String,String)>) -> Result<Self,Error> {
        let mut rank: HashMap<&str,usize> = HashMap::new();
        for (i,c) in categories.iter().enumerate() {
            if rank.insert(c.as_str(),i).is_some() {
                return Err(Error::DuplicateCategory(c.to_string()));
            }
        }
        let mut owner: HashMap<&str,&str> = HashMap::new();
        let mut curr: Option<usize> = None;
        for (category,mnemonic) in &dictionary {
            let r = match rank.get(category.as_str()) {
                Some(r) => *r,
                None => return Err(Error::UnknownCategory(category.to_string()))
            };
            match curr {
                Some(c) if r < c => return Err(Error::CategoryOrder(category.to_string())),
                _ => curr = Some(r)
            }
            if owner.insert(mnemonic.as_str(),category.as_str()).is_some() {
                return Err(Error::DuplicateMnemonic(mnemonic.to_string()));
            }
        }
        Ok(Self {
            categories,
            dictionary
        })
    }
    /// Load from JSON of the form `{"categories": [{"name": ..., "mnemonics": [...]}, ...]}`
    pub fn from_json(json: &str) -> Result<Self,DYNERR> {
        let root = serde_json::from_str::<serde_json::Value>(json)?;
        let list = match root.get("categories").and_then(|x| x.as_array()) {
            Some(list) => list,
            None => return Err(Box::new(Error::Format))
        };
        let mut categories = Vec::new();
        let mut dictionary = Vec::new();
        for item in list {
            let name = match item.get("name").and_then(|x| x.as_str()) {
                Some(name) => name.to_string(),
                None => return Err(Box::new(Error::Format))
            };
            if let Some(mnemonics) = item.get("mnemonics").and_then(|x| x.as_array()) {
                for m in mnemonics {
                    match m.as_str() {
                        Some(s) => dictionary.push((name.clone(),s.to_string())),
                        None => return Err(Box::new(Error::Format))
                    }
                }
            }
            categories.push(name);
        }
        Ok(Self::new(categories,dictionary)?)
    }
    /// The x86-64 glossary that ships with the crate.
    /// This can panic if something is wrong with the JSON,
    /// but the JSON is fixed at compile time and checked by the tests.
    pub fn builtin() -> Self {
        Self::from_json(JSON_STR).expect("built-in glossary is corrupt")
    }
    /// Write the glossary in the plain text format, using `marker` to delimit category names.
    pub fn to_text(&self,marker: char) -> Result<String,Error> {
        if marker.is_whitespace() {
            return Err(Error::MissingMarker);
        }
        let mut ans = String::new();
        let mut pairs = self.dictionary.iter().peekable();
        for category in &self.categories {
            if category.contains(marker) {
                return Err(Error::MarkerCollision(category.to_string()));
            }
            ans.push(marker);
            ans += category;
            ans.push(marker);
            ans.push('\n');
            while let Some((_,mnemonic)) = pairs.next_if(|(c,_)| c==category) {
                if mnemonic.contains(marker) {
                    return Err(Error::MarkerCollision(mnemonic.to_string()));
                }
                ans += mnemonic;
                ans.push('\n');
            }
        }
        Ok(ans)
    }
}

impl GlossaryProvider for Glossary {
    fn get_categories(&self) -> Vec<String> {
        self.categories.clone()
    }
    fn get_dictionary(&self) -> Vec<(String,String)> {
        self.dictionary.clone()
    }
}

#[cfg(test)]
fn pairs(list: &[(&str,&str)]) -> Vec<(String,String)> {
    list.iter().map(|(c,m)| (c.to_string(),m.to_string())).collect()
}

#[test]
fn builtin_loads() {
    let g = Glossary::builtin();
    let cats = g.get_categories();
    assert_eq!(cats[0],"Data transfer instructions");
    assert!(cats.len() > 10);
    let dict = g.get_dictionary();
    assert!(dict.contains(&("Data transfer instructions".to_string(),"mov".to_string())));
    assert!(dict.contains(&("Control transfer instructions".to_string(),"jmp".to_string())));
    assert!(dict.contains(&("Arithmetic instructions".to_string(),"add".to_string())));
}

#[test]
fn unknown_category_rejected() {
    let res = Glossary::new(vec!["A".to_string()],pairs(&[("A","mov"),("B","add")]));
    assert!(matches!(res,Err(Error::UnknownCategory(c)) if c=="B"));
}

#[test]
fn out_of_order_rejected() {
    let cats = vec!["A".to_string(),"B".to_string()];
    let res = Glossary::new(cats,pairs(&[("A","mov"),("B","add"),("A","lea")]));
    assert!(matches!(res,Err(Error::CategoryOrder(c)) if c=="A"));
}

#[test]
fn repeated_category_rejected() {
    let cats = vec!["A".to_string(),"B".to_string(),"A".to_string()];
    let res = Glossary::new(cats,pairs(&[("A","mov"),("B","add")]));
    assert!(matches!(res,Err(Error::DuplicateCategory(c)) if c=="A"));
}

#[test]
fn duplicate_rejected() {
    let cats = vec!["A".to_string(),"B".to_string()];
    let res = Glossary::new(cats,pairs(&[("A","mov"),("B","mov")]));
    assert!(matches!(res,Err(Error::DuplicateMnemonic(m)) if m=="mov"));
}

#[test]
fn text_form() {
    let cats = vec!["A".to_string(),"Empty".to_string(),"B".to_string()];
    let g = Glossary::new(cats,pairs(&[("A","mov"),("A","lea"),("B","add")])).expect("bad glossary");
    assert_eq!(g.to_text('*').unwrap(),"*A*\nmov\nlea\n*Empty*\n*B*\nadd\n");
    assert!(matches!(g.to_text('m'),Err(Error::MarkerCollision(_))));
    assert!(matches!(g.to_text(' '),Err(Error::MissingMarker)));
}

#[test]
fn bad_json() {
    assert!(Glossary::from_json("{}").is_err());
    assert!(Glossary::from_json(r#"{"categories": [{"mnemonics": ["mov"]}]}"#).is_err());
    assert!(Glossary::from_json(r#"{"categories": [{"name": "A", "mnemonics": [1]}]}"#).is_err());
}
