//! Records, nesting levels and node keys.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConvertError, Result};

/// Most nesting levels a conversion accepts. Export and render recurse once
/// per level; this matches serde_json's own recursion limit.
pub const MAX_NESTING_LEVELS: usize = 128;

/// A single flat input record.
pub type Record = Map<String, Value>;

/// Ordered, non-empty list of record attributes used as tree depths.
///
/// The first level is the top-most level of the exported tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct NestingLevels(Vec<String>);

impl NestingLevels {
    /// Build nesting levels, rejecting an empty list, more than
    /// [`MAX_NESTING_LEVELS`] levels and repeated names.
    pub fn new<I, S>(levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        if levels.is_empty() {
            return Err(ConvertError::MissingNestingLevels);
        }
        if levels.len() > MAX_NESTING_LEVELS {
            return Err(ConvertError::InvalidNestingLevels(format!(
                "at most {MAX_NESTING_LEVELS} levels are supported, got {}",
                levels.len()
            )));
        }

        let mut seen = HashSet::with_capacity(levels.len());
        for level in &levels {
            if level.trim().is_empty() {
                return Err(ConvertError::InvalidNestingLevels(
                    "level names cannot be empty".to_string(),
                ));
            }
            if !seen.insert(level.as_str()) {
                return Err(ConvertError::InvalidNestingLevels(format!(
                    "level '{level}' is given more than once"
                )));
            }
        }

        Ok(Self(levels))
    }

    /// Parse a comma separated list (`currency,country,city`).
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|level| !level.is_empty()),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.0.iter().any(|level| level == attribute)
    }

    /// Levels the record does not carry.
    pub fn missing_in<'a>(&'a self, record: &Record) -> Vec<&'a str> {
        self.0
            .iter()
            .filter(|level| !record.contains_key(level.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// The record without its nesting-level attributes.
    pub fn remaining(&self, record: &Record) -> Record {
        record
            .iter()
            .filter(|(key, _)| !self.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl TryFrom<Vec<String>> for NestingLevels {
    type Error = ConvertError;

    fn try_from(levels: Vec<String>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<NestingLevels> for Vec<String> {
    fn from(levels: NestingLevels) -> Self {
        levels.0
    }
}

impl fmt::Display for NestingLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" > "))
    }
}

/// Grouping key of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(String);

impl NodeKey {
    /// Derive a key from a record value.
    ///
    /// Strings are used verbatim, other scalars use their JSON text.
    /// Arrays and objects cannot group records.
    ///
    /// Exported keys are JSON object keys, so a scalar and the string of its
    /// JSON text (`1` and `"1"`, `null` and `"null"`) share one key and
    /// therefore one node.
    pub fn from_value(level: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::Bool(b) => Ok(Self(b.to_string())),
            Value::Null => Ok(Self("null".to_string())),
            Value::Array(_) | Value::Object(_) => Err(ConvertError::InvalidDataStructure(format!(
                "Value of nesting level '{level}' must be a scalar, got {value}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compact listing of a record's values, used in diagnostics.
pub(crate) fn describe_values(record: &Record) -> String {
    let values: Vec<String> = record.values().map(Value::to_string).collect();
    format!("[{}]", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_empty_levels_rejected() {
        let err = NestingLevels::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConvertError::MissingNestingLevels));
    }

    #[test]
    fn test_repeated_level_rejected() {
        let err = NestingLevels::new(["currency", "country", "currency"]).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNestingLevels(_)));
        assert!(err.to_string().contains("currency"));
    }

    #[test]
    fn test_level_cap() {
        let at_cap: Vec<String> = (0..MAX_NESTING_LEVELS).map(|i| format!("l{i}")).collect();
        assert_eq!(NestingLevels::new(at_cap).unwrap().len(), MAX_NESTING_LEVELS);

        let over_cap: Vec<String> = (0..50_000).map(|i| format!("l{i}")).collect();
        let err = NestingLevels::new(over_cap).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNestingLevels(_)));
        assert!(err.to_string().contains("128"));
    }

    #[test]
    fn test_parse_list_trims_and_skips_blanks() {
        let levels = NestingLevels::parse_list(" currency, country,,city ").unwrap();
        assert_eq!(levels.as_slice(), ["currency", "country", "city"]);
        assert!(NestingLevels::parse_list(" , ").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let levels: NestingLevels = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(levels.len(), 2);
        assert!(serde_json::from_value::<NestingLevels>(json!([])).is_err());
    }

    #[test]
    fn test_missing_and_remaining() {
        let levels = NestingLevels::new(["currency", "country"]).unwrap();
        let rec = record(json!({"currency": "EUR", "amount": 20, "city": "Paris"}));

        assert_eq!(levels.missing_in(&rec), vec!["country"]);

        let rest = levels.remaining(&rec);
        assert_eq!(rest.len(), 2);
        assert!(rest.contains_key("amount"));
        assert!(rest.contains_key("city"));
        assert!(!rest.contains_key("currency"));
    }

    #[test]
    fn test_node_key_from_scalars() {
        assert_eq!(NodeKey::from_value("l", &json!("EUR")).unwrap().as_str(), "EUR");
        assert_eq!(NodeKey::from_value("l", &json!(42)).unwrap().as_str(), "42");
        assert_eq!(NodeKey::from_value("l", &json!(2.5)).unwrap().as_str(), "2.5");
        assert_eq!(NodeKey::from_value("l", &json!(true)).unwrap().as_str(), "true");
        assert_eq!(NodeKey::from_value("l", &Value::Null).unwrap().as_str(), "null");
    }

    #[test]
    fn test_node_key_scalar_and_its_text_collide() {
        let number = NodeKey::from_value("l", &json!(1)).unwrap();
        let text = NodeKey::from_value("l", &json!("1")).unwrap();
        assert_eq!(number, text);
        assert_eq!(
            NodeKey::from_value("l", &Value::Null).unwrap(),
            NodeKey::from_value("l", &json!("null")).unwrap()
        );
    }

    #[test]
    fn test_node_key_rejects_containers() {
        let err = NodeKey::from_value("city", &json!(["a"])).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidDataStructure(_)));
        assert!(NodeKey::from_value("city", &json!({"a": 1})).is_err());
    }

    #[test]
    fn test_describe_values() {
        let rec = record(json!({"a": "x", "b": 1}));
        assert_eq!(describe_values(&rec), r#"["x", 1]"#);
    }
}
