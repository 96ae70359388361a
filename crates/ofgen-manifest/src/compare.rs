//! Structural diff between two manifests.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ChangeKind {
    #[serde(rename = "add")]
    Addition,
    #[serde(rename = "remove")]
    Removal,
    #[serde(rename = "change")]
    Modification,
}

/// One difference between two manifests, addressed as `flags.<key>`.
///
/// Modifications carry the whole old and new definitions; there is no
/// field-level diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl Change {
    fn addition(key: &str, new: &Value) -> Self {
        Self {
            kind: ChangeKind::Addition,
            path: flag_path(key),
            old_value: None,
            new_value: Some(new.clone()),
        }
    }

    fn removal(key: &str, old: &Value) -> Self {
        Self {
            kind: ChangeKind::Removal,
            path: flag_path(key),
            old_value: Some(old.clone()),
            new_value: None,
        }
    }

    fn modification(key: &str, old: &Value, new: &Value) -> Self {
        Self {
            kind: ChangeKind::Modification,
            path: flag_path(key),
            old_value: Some(old.clone()),
            new_value: Some(new.clone()),
        }
    }

    /// The flag key this change addresses.
    pub fn key(&self) -> &str {
        self.path.strip_prefix("flags.").unwrap_or(&self.path)
    }
}

fn flag_path(key: &str) -> String {
    format!("flags.{key}")
}

/// Every difference between `source` and `target`.
///
/// Keys only in `target` are additions, keys only in `source` are removals,
/// and keys in both whose definitions differ structurally are modifications.
/// The order of the result is unspecified; callers presenting it sort by path.
pub fn compare(source: &Manifest, target: &Manifest) -> Vec<Change> {
    let mut changes = Vec::new();

    for (key, new) in &target.flags {
        match source.flags.get(key) {
            None => changes.push(Change::addition(key, new)),
            Some(old) if old != new => changes.push(Change::modification(key, old, new)),
            Some(_) => {}
        }
    }
    for (key, old) in &source.flags {
        if !target.flags.contains_key(key) {
            changes.push(Change::removal(key, old));
        }
    }

    tracing::debug!(changes = changes.len(), "compared manifests");
    changes
}
