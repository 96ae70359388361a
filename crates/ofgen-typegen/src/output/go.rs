//! Go backend.
//!
//! Generates one file, `<package-name>.go`, with a struct-of-funcs accessor
//! per flag over the Go SDK client.

use crate::ir::{Flag, FlagType, Flagset};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, ParamSpec, TemplateFile};

use super::{C_STYLE, default_literal};

const TEMPLATE: &str = include_str!("templates/go.hbs");

const PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "package-name",
    help: "Name of the generated Go package",
    default: "openfeature",
}];

/// Go backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoBackend;

impl Backend for GoBackend {
    fn name(&self) -> &'static str {
        "go"
    }

    fn language(&self) -> &'static str {
        "Go"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe accessors compatible with the OpenFeature Go SDK."
    }

    fn unsupported_types(&self) -> &'static [FlagType] {
        &[FlagType::Object]
    }

    fn runtime_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("Boolean"),
            FlagType::String => Some("String"),
            FlagType::Int => Some("Int"),
            FlagType::Float => Some("Float"),
            FlagType::Object | FlagType::Unknown => None,
        }
    }

    fn native_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("bool"),
            FlagType::String => Some("string"),
            FlagType::Int => Some("int64"),
            FlagType::Float => Some("float64"),
            FlagType::Object | FlagType::Unknown => None,
        }
    }

    fn default_literal(&self, flag: &Flag) -> Result<String, LiteralError> {
        default_literal(self.name(), flag, C_STYLE)
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn imports(&self, flagset: &Flagset) -> Vec<String> {
        if flagset.is_empty() {
            return Vec::new();
        }
        let mut imports = vec![
            "\"context\"".to_string(),
            "\"github.com/open-feature/go-sdk/openfeature\"".to_string(),
        ];
        imports.sort();
        imports
    }

    fn templates(&self, params: &GeneratorParams) -> Vec<TemplateFile> {
        let package = params.get("package-name").unwrap_or(PARAMS[0].default);
        vec![TemplateFile::new(format!("{package}.go"), TEMPLATE)]
    }
}
