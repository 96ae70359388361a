//! NestJS backend.
//!
//! Generates parameter decorators per flag plus the Node.js client, so one
//! target covers both injection and direct evaluation.

use std::collections::BTreeSet;

use crate::ir::{Flag, FlagType, Flagset};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, TemplateFile};

use super::{C_STYLE, default_literal, typescript_native_type, typescript_runtime_type};

const DECORATORS_TEMPLATE: &str = include_str!("templates/nestjs.hbs");

/// NestJS backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestJsBackend;

impl Backend for NestJsBackend {
    fn name(&self) -> &'static str {
        "nestjs"
    }

    fn language(&self) -> &'static str {
        "NestJS"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe NestJS decorators compatible with the OpenFeature NestJS SDK."
    }

    fn unsupported_types(&self) -> &'static [FlagType] {
        &[FlagType::Object]
    }

    fn runtime_type(&self, flag_type: FlagType) -> Option<&'static str> {
        typescript_runtime_type(flag_type)
    }

    fn native_type(&self, flag_type: FlagType) -> Option<&'static str> {
        typescript_native_type(flag_type)
    }

    fn default_literal(&self, flag: &Flag) -> Result<String, LiteralError> {
        default_literal(self.name(), flag, C_STYLE)
    }

    /// Decorator factories used by the flags, e.g. `BooleanFeatureFlag`.
    fn imports(&self, flagset: &Flagset) -> Vec<String> {
        flagset
            .iter()
            .filter_map(|f| self.runtime_type(f.flag_type))
            .map(|token| format!("{token}FeatureFlag"))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn templates(&self, _params: &GeneratorParams) -> Vec<TemplateFile> {
        vec![
            TemplateFile::new("openfeature-decorators.ts", DECORATORS_TEMPLATE),
            TemplateFile::new("openfeature.ts", super::nodejs::TEMPLATE),
        ]
    }
}
