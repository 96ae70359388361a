//! React backend (OpenFeature web SDK hooks).

use crate::ir::{Flag, FlagType};
use crate::render::GeneratorParams;
use crate::traits::{Backend, LiteralError, TemplateFile};

use super::{C_STYLE, default_literal, typescript_native_type, typescript_runtime_type};

const TEMPLATE: &str = include_str!("templates/react.hbs");

/// React backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactBackend;

impl Backend for ReactBackend {
    fn name(&self) -> &'static str {
        "react"
    }

    fn language(&self) -> &'static str {
        "React"
    }

    fn description(&self) -> &'static str {
        "Generate typesafe React hooks compatible with the OpenFeature React SDK."
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Flagset;
    use crate::render::Generator;

    #[test]
    fn test_render() {
        let flags = Flagset::new(vec![Flag::new("enableFeatureA", FlagType::Bool, false)]);
        let files = Generator::new(&ReactBackend, &flags)
            .render(&GeneratorParams::new("out"))
            .unwrap();
        let ts = &files[0].contents;
        assert!(ts.contains("export const useEnableFeatureA = (options?: ReactFlagEvaluationOptions): FlagQuery<boolean> => {"));
        assert!(ts.contains("return useFlag(\"enableFeatureA\", false, options);"));
        assert!(ts.contains("export const useSuspenseEnableFeatureA = ("));
        assert!(ts.contains("return useSuspenseFlag(\"enableFeatureA\", false, options);"));
    }
}
