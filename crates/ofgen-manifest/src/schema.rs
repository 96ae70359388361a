//! Manifest schema and validation.
//!
//! The schema is embedded at compile time. Validation separates *data* errors
//! (the document is JSON but breaks the schema), which come back as a list,
//! from *fatal* errors (the schema does not compile, or the input is not
//! JSON), which come back as [`SchemaError`].

use std::collections::BTreeMap;
use std::fmt;

use jsonschema::error::ValidationErrorKind;
use serde::Serialize;

/// The flag manifest JSON Schema (draft-07).
pub const MANIFEST_SCHEMA: &str = include_str!("../schema/v0/flag-manifest.json");

/// Published location of [`MANIFEST_SCHEMA`], written into new manifests.
pub const MANIFEST_SCHEMA_URL: &str = "https://raw.githubusercontent.com/rhi-zone/ofgen/main/crates/ofgen-manifest/schema/v0/flag-manifest.json";

/// Message substituted for `oneOf` failures on a flag definition.
pub const FLAG_TYPE_MESSAGE: &str =
    "flagType must be one of: boolean, string, integer, float, object";

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ValidationError {
    /// Dotted path into the document, `(root)` for the document itself.
    pub path: String,
    pub message: String,
    /// Violated rule, e.g. `one_of_not_valid` or `required`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Declared `flagType` of the offending flag, when the document has one.
    #[serde(rename = "flagType", skip_serializing_if = "Option::is_none")]
    pub flag_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to compile manifest schema: {0}")]
    Compile(String),
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validate raw manifest bytes against [`MANIFEST_SCHEMA`].
///
/// Returns every violation, sorted by path then message. An empty list means
/// the document is valid.
pub fn validate(data: &[u8]) -> Result<Vec<ValidationError>, SchemaError> {
    let schema: serde_json::Value =
        serde_json::from_str(MANIFEST_SCHEMA).map_err(|e| SchemaError::Compile(e.to_string()))?;
    let validator =
        jsonschema::validator_for(&schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
    let instance: serde_json::Value = serde_json::from_slice(data)?;

    let mut errors: Vec<ValidationError> = validator
        .iter_errors(&instance)
        .map(|error| {
            let path = dotted_path(&error.instance_path.to_string());
            let one_of = matches!(error.kind, ValidationErrorKind::OneOfNotValid { .. });
            let message = if one_of && path.starts_with("flags") {
                FLAG_TYPE_MESSAGE.to_string()
            } else {
                error.to_string()
            };
            ValidationError {
                flag_type: declared_flag_type(&instance, &path),
                kind: rule_name(&error.kind).to_string(),
                path,
                message,
            }
        })
        .collect();
    errors.sort();
    errors.dedup();
    tracing::debug!(count = errors.len(), "validated manifest");
    Ok(errors)
}

/// `/flags/a~1b/defaultValue` → `flags.a/b.defaultValue`; `` → `(root)`.
fn dotted_path(pointer: &str) -> String {
    let segments: Vec<String> = pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect();
    if segments.is_empty() {
        "(root)".to_string()
    } else {
        segments.join(".")
    }
}

fn declared_flag_type(instance: &serde_json::Value, path: &str) -> Option<String> {
    let key = path.strip_prefix("flags.")?;
    // The key may itself contain dots; take the longest prefix that names a flag.
    let flags = instance.get("flags")?.as_object()?;
    let mut candidate = key;
    loop {
        if let Some(flag) = flags.get(candidate) {
            return flag.get("flagType")?.as_str().map(str::to_string);
        }
        candidate = &candidate[..candidate.rfind('.')?];
    }
}

/// Name of the failed rule, as reported in `ValidationError::kind`.
fn rule_name(kind: &ValidationErrorKind) -> &'static str {
    match kind {
        ValidationErrorKind::AdditionalProperties { .. } => "additional_properties",
        ValidationErrorKind::AnyOf { .. } => "any_of",
        ValidationErrorKind::Constant { .. } => "constant",
        ValidationErrorKind::Enum { .. } => "enum",
        ValidationErrorKind::FalseSchema { .. } => "false_schema",
        ValidationErrorKind::Format { .. } => "format",
        ValidationErrorKind::MaxLength { .. } => "max_length",
        ValidationErrorKind::Maximum { .. } => "maximum",
        ValidationErrorKind::MinLength { .. } => "min_length",
        ValidationErrorKind::Minimum { .. } => "minimum",
        ValidationErrorKind::OneOfMultipleValid { .. } => "one_of_multiple_valid",
        ValidationErrorKind::OneOfNotValid { .. } => "one_of_not_valid",
        ValidationErrorKind::Pattern { .. } => "pattern",
        ValidationErrorKind::Required { .. } => "required",
        ValidationErrorKind::Type { .. } => "type",
        _ => "other",
    }
}

/// Aggregated, human-readable rendering of validation errors.
///
/// Errors are grouped by path, groups are ordered by path, and each group
/// ends with a fixed suggestion block.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut groups: BTreeMap<&str, Vec<&ValidationError>> = BTreeMap::new();
        for error in &self.errors {
            groups.entry(error.path.as_str()).or_default().push(error);
        }

        writeln!(f, "flag manifest validation failed:")?;
        writeln!(f)?;
        for (path, errors) in groups {
            let flag_type = errors
                .iter()
                .find_map(|e| e.flag_type.as_deref())
                .unwrap_or("missing");
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            writeln!(f, "- flagType: {flag_type}")?;
            writeln!(f, "  flagPath: {path}")?;
            writeln!(f, "  errors:")?;
            writeln!(f, "    ~ {}", messages.join("\n    ~ "))?;
            writeln!(f, "  Suggestions:")?;
            writeln!(f, "    - flagType: boolean")?;
            writeln!(f, "    - defaultValue: true")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
