//! Flag manifest to IR loader.

use std::collections::HashMap;
use std::path::Path;

use ofgen_manifest::{FileStore, SchemaError, StoreError, ValidationReport, Value};
use serde::Deserialize;

use crate::ir::{Flag, FlagType, Flagset};

/// Error loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document breaks the schema. Displays the aggregated report.
    #[error("{0}")]
    Validation(ValidationReport),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to decode manifest: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] StoreError),
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    flags: HashMap<String, RawFlag>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlag {
    flag_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_value: Value,
}

/// Validate and decode manifest bytes into a [`Flagset`] sorted by key.
pub fn load(data: &[u8]) -> Result<Flagset, LoadError> {
    let errors = ofgen_manifest::validate(data)?;
    if !errors.is_empty() {
        return Err(LoadError::Validation(ValidationReport::new(errors)));
    }

    let raw: RawManifest =
        serde_json::from_slice(data).map_err(|e| LoadError::Decode(e.to_string()))?;

    let mut flags = Vec::with_capacity(raw.flags.len());
    for (key, flag) in raw.flags {
        let Some(flag_type) = FlagType::from_manifest(&flag.flag_type) else {
            return Err(LoadError::Decode(format!(
                "flag `{key}` has unknown flagType `{}`",
                flag.flag_type
            )));
        };
        flags.push(Flag {
            key,
            flag_type,
            description: flag.description,
            default_value: flag.default_value,
        });
    }

    let flagset = Flagset::new(flags);
    tracing::debug!(flags = flagset.len(), "loaded manifest");
    Ok(flagset)
}

/// Read `path` from `store` and [`load`] it.
pub fn load_path(store: &dyn FileStore, path: &Path) -> Result<Flagset, LoadError> {
    tracing::debug!(path = %path.display(), "reading manifest");
    let data = store.read(path)?;
    load(&data)
}
