//! Node.js backend (OpenFeature server SDK).

use crate::ir::{Flag, FlagType};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, TemplateFile};

use super::{C_STYLE, default_literal, typescript_native_type, typescript_runtime_type};

pub(crate) const TEMPLATE: &str = include_str!("templates/nodejs.hbs");

/// Node.js backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeJsBackend;

impl Backend for NodeJsBackend {
    fn name(&self) -> &'static str {
        "nodejs"
    }

    fn language(&self) -> &'static str {
        "Node.js"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe Node.js client compatible with the OpenFeature JavaScript server SDK."
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

    fn templates(&self, _params: &GeneratorParams) -> Vec<TemplateFile> {
        vec![TemplateFile::new("openfeature.ts", TEMPLATE)]
    }
}
