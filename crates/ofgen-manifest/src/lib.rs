//! Feature flag manifests: the schema, validation, and structural comparison.
//!
//! A manifest is a JSON document of the form
//!
//! ```json
//! {
//!   "$schema": "https://.../flag-manifest.json",
//!   "flags": {
//!     "enableFeatureA": {
//!       "flagType": "boolean",
//!       "defaultValue": false,
//!       "description": "Controls whether Feature A is enabled."
//!     }
//!   }
//! }
//! ```
//!
//! This crate knows nothing about code generation. It provides:
//!
//! - [`schema`]: the embedded JSON Schema and [`schema::validate`]
//! - [`value`]: a tagged JSON value with structural equality
//! - [`manifest`]: the raw document, used by `init` and `compare`
//! - [`compare`]: additions, removals, and modifications between two manifests
//! - [`store`]: file access with atomic whole-file writes

pub mod compare;
pub mod manifest;
pub mod schema;
pub mod store;
pub mod value;

pub use compare::{Change, ChangeKind, compare};
pub use manifest::Manifest;
pub use schema::{
    MANIFEST_SCHEMA, MANIFEST_SCHEMA_URL, SchemaError, ValidationError, ValidationReport, validate,
};
pub use store::{FileStore, MemoryFileStore, OsFileStore, StoreError};
pub use value::{Value, exact_i64, structurally_equal};
