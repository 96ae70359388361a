//! C# backend.

use crate::ir::{Flag, FlagType};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, ParamSpec, TemplateFile};

use super::{I32_STYLE, default_literal};

const TEMPLATE: &str = include_str!("templates/csharp.hbs");

const PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "namespace",
    help: "Namespace for the generated C# code",
    default: "OpenFeature",
}];

/// C# backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpBackend;

impl Backend for CSharpBackend {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn language(&self) -> &'static str {
        "C#"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe C# client compatible with the OpenFeature .NET SDK."
    }

    fn unsupported_types(&self) -> &'static [FlagType] {
        &[FlagType::Object]
    }

    fn runtime_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("Boolean"),
            FlagType::String => Some("String"),
            FlagType::Int => Some("Integer"),
            FlagType::Float => Some("Double"),
            FlagType::Object | FlagType::Unknown => None,
        }
    }

    fn native_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("bool"),
            FlagType::String => Some("string"),
            FlagType::Int => Some("int"),
            FlagType::Float => Some("double"),
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
        vec![TemplateFile::new("OpenFeature.g.cs", TEMPLATE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Flagset;
    use crate::render::Generator;

    #[test]
    fn test_render() {
        let flags = Flagset::new(vec![
            Flag::new("discountPercentage", FlagType::Float, 0.15).with_description("Discount"),
        ]);
        let files = Generator::new(&CSharpBackend, &flags)
            .render(&GeneratorParams::new("out").with("namespace", "MyApp.Flags"))
            .unwrap();
        assert_eq!(files[0].path, std::path::PathBuf::from("out/OpenFeature.g.cs"));
        let cs = &files[0].contents;
        assert!(cs.contains("namespace MyApp.Flags\n{"));
        assert!(cs.contains("public async Task<double> DiscountPercentageAsync("));
        assert!(cs.contains(
            "return await _client.GetDoubleValueAsync(\"discountPercentage\", 0.15, evaluationContext, options, cancellationToken);"
        ));
        assert!(cs.contains("public async Task<FlagEvaluationDetails<double>> DiscountPercentageDetailsAsync("));
    }

    #[test]
    fn test_integer_default_must_fit_in_int() {
        let fits = Flag::new("wide", FlagType::Int, 2_147_483_647i64);
        assert_eq!(CSharpBackend.default_literal(&fits).unwrap(), "2147483647");

        let flags = Flagset::new(vec![Flag::new("wide", FlagType::Int, 5_000_000_000i64)]);
        let err = Generator::new(&CSharpBackend, &flags)
            .render(&GeneratorParams::new("out"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::render::GenerateError::Literal {
                target: "csharp",
                source: LiteralError::OutOfRange { .. },
            }
        ));
    }
}
