//! Java backend.

use crate::ir::{Flag, FlagType};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, ParamSpec, TemplateFile};

use super::{I32_STYLE, default_literal};

const TEMPLATE: &str = include_str!("templates/java.hbs");

const PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "package-name",
    help: "Name of the generated Java package",
    default: "dev.openfeature.generated",
}];

/// Java backend. Uses boxed types throughout, matching the SDK signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaBackend;

impl Backend for JavaBackend {
    fn name(&self) -> &'static str {
        "java"
    }

    fn language(&self) -> &'static str {
        "Java"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe Java client compatible with the OpenFeature Java SDK."
    }

    fn unsupported_types(&self) -> &'static [FlagType] {
        &[FlagType::Object]
    }

    fn runtime_type(&self, flag_type: FlagType) -> Option<&'static str> {
        self.native_type(flag_type)
    }

    fn native_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("Boolean"),
            FlagType::String => Some("String"),
            FlagType::Int => Some("Integer"),
            FlagType::Float => Some("Double"),
            FlagType::Object | FlagType::Unknown => None,
        }
    }

    fn default_literal(&self, flag: &Flag) -> Result<String, LiteralError> {
        default_literal(self.name(), flag, I32_STYLE)
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn templates(&self, _params: &GeneratorParams) -> Vec<TemplateFile> {
        vec![TemplateFile::new("OpenFeature.java", TEMPLATE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Flagset;
    use crate::render::Generator;

    #[test]
    fn test_render() {
        let flags = Flagset::new(vec![Flag::new("enableFeatureA", FlagType::Bool, false)]);
        let files = Generator::new(&JavaBackend, &flags)
            .render(&GeneratorParams::new("out"))
            .unwrap();
        let java = &files[0].contents;
        assert!(java.contains("package dev.openfeature.generated;\n"));
        assert!(java.contains("public Boolean enableFeatureA(EvaluationContext ctx) {"));
        assert!(java.contains("return client.getBooleanValue(\"enableFeatureA\", false, ctx);"));
        assert!(java.contains(
            "public FlagEvaluationDetails<Boolean> enableFeatureADetails(EvaluationContext ctx) {"
        ));
    }

    #[test]
    fn test_integer_default_must_fit_in_int() {
        let fits = Flag::new("wide", FlagType::Int, 2_147_483_647i64);
        assert_eq!(JavaBackend.default_literal(&fits).unwrap(), "2147483647");

        let flags = Flagset::new(vec![Flag::new("wide", FlagType::Int, 5_000_000_000i64)]);
        let err = Generator::new(&JavaBackend, &flags)
            .render(&GeneratorParams::new("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::render::GenerateError::Literal {
                target: "java",
                source: LiteralError::OutOfRange { .. },
            }
        ));
    }
}
