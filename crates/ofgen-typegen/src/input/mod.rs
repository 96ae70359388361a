//! Input parsers.
//!
//! The only input format is the flag manifest. Parsing validates against the
//! embedded schema, resolves flag types, and produces a sorted
//! [`Flagset`](crate::ir::Flagset).

mod manifest;

pub use manifest::{LoadError, load, load_path};
