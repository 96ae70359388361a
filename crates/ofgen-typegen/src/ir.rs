//! Intermediate representation of a loaded manifest.
//!
//! Everything downstream of the loader works on a [`Flagset`]: a list of
//! [`Flag`]s sorted by key, with types already resolved to [`FlagType`].

use std::fmt;

use ofgen_manifest::Value;
use serde::{Deserialize, Serialize};

/// The type a flag evaluates to.
///
/// Serialized with the manifest spelling (`boolean`, `string`, `integer`,
/// `float`, `object`). `Unknown` exists for completeness and never appears in
/// a loaded [`Flagset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlagType {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "integer")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Bool,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "object")]
    Object,
}

impl FlagType {
    /// Parse the manifest's `flagType` spelling.
    pub fn from_manifest(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(FlagType::Bool),
            "string" => Some(FlagType::String),
            "integer" => Some(FlagType::Int),
            "float" => Some(FlagType::Float),
            "object" => Some(FlagType::Object),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlagType::Unknown => "unknown",
            FlagType::Int => "integer",
            FlagType::Float => "float",
            FlagType::Bool => "boolean",
            FlagType::String => "string",
            FlagType::Object => "object",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single flag after loading.
///
/// This is also the shape templates see for each entry of `flags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub key: String,
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    #[serde(default)]
    pub description: String,
    pub default_value: Value,
}

impl Flag {
    pub fn new(key: impl Into<String>, flag_type: FlagType, default_value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            flag_type,
            description: String::new(),
            default_value: default_value.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Flags sorted ascending by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Flagset {
    flags: Vec<Flag>,
}

impl Flagset {
    /// Build a flagset, establishing key order.
    pub fn new(mut flags: Vec<Flag>) -> Self {
        flags.sort_by(|a, b| a.key.cmp(&b.key));
        Self { flags }
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.flags.iter().map(|f| f.key.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&Flag> {
        self.flags
            .binary_search_by(|f| f.key.as_str().cmp(key))
            .ok()
            .map(|i| &self.flags[i])
    }

    /// Flags whose type is not in `unsupported`, in the same order.
    pub fn filter(&self, unsupported: &[FlagType]) -> Flagset {
        Flagset {
            flags: self
                .flags
                .iter()
                .filter(|f| !unsupported.contains(&f.flag_type))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Flagset {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Flagset {
        Flagset::new(vec![
            Flag::new("zeta", FlagType::Object, Value::Null),
            Flag::new("alpha", FlagType::Bool, true),
            Flag::new("mid", FlagType::Int, 3i64),
            Flag::new("beta", FlagType::Object, Value::Null),
        ])
    }

    #[test]
    fn test_new_sorts_by_key() {
        assert_eq!(sample().keys(), vec!["alpha", "beta", "mid", "zeta"]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let filtered = sample().filter(&[FlagType::Object]);
        assert_eq!(filtered.keys(), vec!["alpha", "mid"]);
    }

    #[test]
    fn test_filter_nothing_unsupported() {
        assert_eq!(sample().filter(&[]), sample());
    }

    #[test]
    fn test_get() {
        let set = sample();
        assert_eq!(set.get("mid").map(|f| f.flag_type), Some(FlagType::Int));
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn test_flag_type_names() {
        for ty in [
            FlagType::Bool,
            FlagType::String,
            FlagType::Int,
            FlagType::Float,
            FlagType::Object,
        ] {
            assert_eq!(FlagType::from_manifest(ty.as_str()), Some(ty));
            assert_eq!(
                serde_json::to_value(ty).unwrap(),
                serde_json::Value::String(ty.to_string())
            );
        }
        assert_eq!(FlagType::from_manifest("unknown"), None);
    }

    #[test]
    fn test_flag_template_shape() {
        let flag = Flag::new("enableFeatureA", FlagType::Bool, false).with_description("A");
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "enableFeatureA",
                "type": "boolean",
                "description": "A",
                "defaultValue": false
            })
        );
        let back: Flag = serde_json::from_value(json).unwrap();
        assert_eq!(back, flag);
    }
}
