//! Parse a settings string handed to the preprocessor.
//!
//! The settings are a JSON object, any key that is missing or malformed keeps its default.
//! The settings structure can then be used by the pipeline stages.

use std::str::FromStr;
use serde_json;
use crate::DYNERR;

/// Largest number of decimal places a share may be rounded to
const MAX_DECIMALS: i64 = 15;

#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("settings are not a JSON object")]
    NotAnObject,
    #[error("unknown degenerate row policy")]
    UnknownPolicy
}

/// What to do with a function that has no categorized tokens
#[derive(Clone,Copy,PartialEq,Debug)]
pub enum Degenerate {
    /// stop and report the function
    Error,
    /// leave the function out of the table
    Drop
}

impl FromStr for Degenerate {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self,Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "drop" => Ok(Self::Drop),
            _ => Err(Error::UnknownPolicy)
        }
    }
}

#[derive(Clone,Debug)]
pub struct Tokenizer {
    pub delimiter: char,
    pub noise: Vec<String>
}
#[derive(Clone,Debug)]
pub struct Aggregator {
    pub decimals: u32,
    pub degenerate: Degenerate
}
#[derive(Clone,Debug)]
pub struct Settings {
    pub tokenizer: Tokenizer,
    pub aggregator: Aggregator
}

impl Settings {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer {
                delimiter: '\'',
                noise: vec!["[".to_string(),"]".to_string(),",".to_string()]
            },
            aggregator: Aggregator {
                decimals: 2,
                degenerate: Degenerate::Error
            }
        }
    }
}

/// Try to update a single character from a serde `Value` presumed to be an object.
/// The string must hold exactly one character, otherwise do not change the value.
fn update_json_char(maybe_obj: &serde_json::Value, key: &str, curr: &mut char) {
    if let Some(s) = maybe_obj.get(key).and_then(|x| x.as_str()) {
        let mut chars = s.chars();
        match (chars.next(),chars.next()) {
            (Some(c),None) => *curr = c,
            _ => log::warn!("setting `{}` should be a single character",key)
        }
    }
}

/// Try to update a string list from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
fn update_json_vec_str(maybe_obj: &serde_json::Value, key: &str, curr: &mut Vec<String>) {
    if let Some(a) = maybe_obj.get(key).and_then(|x| x.as_array()) {
        let mut ans = Vec::new();
        for v in a {
            match v.as_str() {
                Some(s) => ans.push(s.to_string()),
                None => return
            }
        }
        *curr = ans;
    }
}

/// Try to update an integer from a serde `Value` presumed to be an object.
/// If there is any error do not change the value.
fn update_json_i64(maybe_obj: &serde_json::Value, key: &str, curr: &mut i64) {
    if let Some(x) = maybe_obj.get(key).and_then(|x| x.as_i64()) {
        *curr = x;
    }
}

pub fn parse(json: &str) -> Result<Settings,DYNERR> {
    let mut ans = Settings::new();
    let root = serde_json::from_str::<serde_json::Value>(json)?;
    let obj = match root.as_object() {
        Some(obj) => obj,
        None => return Err(Box::new(Error::NotAnObject))
    };
    for (key,val) in obj {
        match key.as_str() {
            "tokenizer" => {
                update_json_char(val,"delimiter",&mut ans.tokenizer.delimiter);
                update_json_vec_str(val,"noise",&mut ans.tokenizer.noise);
            },
            "aggregator" => {
                let mut decimals = ans.aggregator.decimals as i64;
                update_json_i64(val,"decimals",&mut decimals);
                ans.aggregator.decimals = decimals.clamp(0,MAX_DECIMALS) as u32;
                if let Some(policy) = val.get("degenerate").and_then(|x| x.as_str()) {
                    ans.aggregator.degenerate = Degenerate::from_str(policy)?;
                }
            },
            _ => log::debug!("ignoring setting `{}`",key)
        }
    }
    Ok(ans)
}

#[test]
fn defaults_survive_empty_object() {
    let settings = parse("{}").expect("parse failed");
    assert_eq!(settings.tokenizer.delimiter,'\'');
    assert_eq!(settings.tokenizer.noise,vec!["[","]",","]);
    assert_eq!(settings.aggregator.decimals,2);
    assert_eq!(settings.aggregator.degenerate,Degenerate::Error);
}

#[test]
fn parse_all_keys() {
    let s = r#"{
        "tokenizer": { "delimiter": "\"", "noise": ["(", ")"] },
        "aggregator": { "decimals": 3, "degenerate": "drop" }
    }"#;
    let settings = parse(s).expect("parse failed");
    assert_eq!(settings.tokenizer.delimiter,'"');
    assert_eq!(settings.tokenizer.noise,vec!["(",")"]);
    assert_eq!(settings.aggregator.decimals,3);
    assert_eq!(settings.aggregator.degenerate,Degenerate::Drop);
}

#[test]
fn malformed_values_keep_defaults() {
    let s = r#"{ "tokenizer": { "delimiter": "ab", "noise": [1,2] }, "aggregator": { "decimals": 99 } }"#;
    let settings = parse(s).expect("parse failed");
    assert_eq!(settings.tokenizer.delimiter,'\'');
    assert_eq!(settings.tokenizer.noise.len(),3);
    assert_eq!(settings.aggregator.decimals,15);
}

#[test]
fn bad_policy_and_bad_json() {
    assert!(parse(r#"{"aggregator": {"degenerate": "ignore"}}"#).is_err());
    assert!(parse("[1,2]").is_err());
    assert!(parse("{").is_err());
}
