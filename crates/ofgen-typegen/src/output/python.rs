//! Python backend.

use crate::ir::{Flag, FlagType};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, TemplateFile};

use super::{BoolLiterals, IntWidth, LiteralStyle, default_literal};

const TEMPLATE: &str = include_str!("templates/python.hbs");

const PYTHON_STYLE: LiteralStyle = LiteralStyle {
    bools: BoolLiterals {
        truthy: "True",
        falsy: "False",
    },
    int_width: IntWidth::I64,
};

/// Python backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonBackend;

impl Backend for PythonBackend {
    fn name(&self) -> &'static str {
        "python"
    }

    fn language(&self) -> &'static str {
        "Python"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe Python client compatible with the OpenFeature Python SDK."
    }

    fn unsupported_types(&self) -> &'static [FlagType] {
        &[FlagType::Object]
    }

    /// Method infix, as in `get_boolean_value`.
    fn runtime_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("boolean"),
            FlagType::String => Some("string"),
            FlagType::Int => Some("integer"),
            FlagType::Float => Some("float"),
            FlagType::Object | FlagType::Unknown => None,
        }
    }

    fn native_type(&self, flag_type: FlagType) -> Option<&'static str> {
        match flag_type {
            FlagType::Bool => Some("bool"),
            FlagType::String => Some("str"),
            FlagType::Int => Some("int"),
            FlagType::Float => Some("float"),
            FlagType::Object | FlagType::Unknown => None,
        }
    }

    fn default_literal(&self, flag: &Flag) -> Result<String, LiteralError> {
        default_literal(self.name(), flag, PYTHON_STYLE)
    }

    fn templates(&self, _params: &GeneratorParams) -> Vec<TemplateFile> {
        vec![TemplateFile::new("openfeature.py", TEMPLATE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Flagset;
    use crate::render::Generator;

    #[test]
    fn test_python_booleans() {
        let flag = Flag::new("on", FlagType::Bool, true);
        assert_eq!(PythonBackend.default_literal(&flag).unwrap(), "True");
    }

    #[test]
    fn test_render() {
        let flags = Flagset::new(vec![
            Flag::new("enableFeatureA", FlagType::Bool, false),
            Flag::new("greetingMessage", FlagType::String, "Hello there!"),
        ]);
        let files = Generator::new(&PythonBackend, &flags)
            .render(&GeneratorParams::new("out"))
            .unwrap();
        let py = &files[0].contents;
        assert!(py.contains("    def enable_feature_a(\n"));
        assert!(py.contains("    ) -> bool:\n"));
        assert!(py.contains("return self.client.get_boolean_value(\n            \"enableFeatureA\",\n            False,"));
        assert!(py.contains("    async def greeting_message_async(\n"));
        assert!(py.contains("return await self.client.get_string_value_async("));
        assert!(py.contains("    def greeting_message_details(\n"));
        assert!(py.contains("-> FlagEvaluationDetails[str]:"));
    }
}
