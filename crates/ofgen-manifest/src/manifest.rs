//! The manifest document as read from disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::MANIFEST_SCHEMA_URL;
use crate::value::Value;

/// A flag manifest: an optional `$schema` reference and the map of flag
/// definitions keyed by flag key.
///
/// Definitions are kept as raw [`Value`]s. Comparing manifests works on whole
/// definitions and does not need them to be schema-valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub flags: BTreeMap<String, Value>,
}

impl Manifest {
    /// Decode a manifest document.
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// The document written by `init`: a schema reference and no flags.
    pub fn empty() -> Self {
        Self {
            schema: Some(MANIFEST_SCHEMA_URL.to_string()),
            flags: BTreeMap::new(),
        }
    }

    pub fn with_flag(mut self, key: impl Into<String>, definition: Value) -> Self {
        self.flags.insert(key.into(), definition);
        self
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
