//! Traits for code generation backends.

use std::fmt;

use crate::ir::{Flag, FlagType, Flagset};
use crate::render::GeneratorParams;

/// Maturity of a backend's generated API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stability {
    Alpha,
    Beta,
    Stable,
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stability::Alpha => "alpha",
            Stability::Beta => "beta",
            Stability::Stable => "stable",
        })
    }
}

/// A named parameter a backend accepts, e.g. `package-name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub default: &'static str,
}

/// One output file: its name relative to the output directory and the
/// handlebars source that renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub name: String,
    pub source: &'static str,
}

impl TemplateFile {
    pub fn new(name: impl Into<String>, source: &'static str) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("{target} has no literal for {flag_type} flag `{key}`")]
    Unsupported {
        target: &'static str,
        key: String,
        flag_type: FlagType,
    },
    #[error("default value of flag `{key}` is {found}, expected {flag_type}")]
    Mismatch {
        key: String,
        flag_type: FlagType,
        found: &'static str,
    },
    #[error("{target} cannot represent default {value} of flag `{key}` as a {width} integer")]
    OutOfRange {
        target: &'static str,
        key: String,
        value: String,
        width: &'static str,
    },
}

/// A code generation backend.
///
/// Backends map flag types onto a target language and its OpenFeature SDK,
/// and supply the templates that render the accessor files. The shared
/// [`Generator`](crate::render::Generator) does the rest.
///
/// # Implementing Custom Backends
///
/// ```ignore
/// use ofgen_typegen::{Backend, BackendRegistry, FlagType, TemplateFile};
///
/// struct KotlinBackend;
///
/// impl Backend for KotlinBackend {
///     fn name(&self) -> &'static str { "kotlin" }
///     fn language(&self) -> &'static str { "Kotlin" }
///     fn description(&self) -> &'static str { "Generate typesafe Kotlin client." }
///     fn unsupported_types(&self) -> &'static [FlagType] { &[FlagType::Object] }
///     /* runtime_type, native_type, default_literal, templates */
/// }
///
/// let mut registry = BackendRegistry::with_builtins();
/// registry.register(Box::new(KotlinBackend));
/// ```
pub trait Backend: Send + Sync {
    /// Unique target identifier used on the command line (e.g. "go", "nestjs").
    fn name(&self) -> &'static str;

    /// Human-readable language name (e.g. "Go", "NestJS").
    fn language(&self) -> &'static str;

    /// One-line summary shown when listing targets.
    fn description(&self) -> &'static str;

    fn stability(&self) -> Stability {
        Stability::Alpha
    }

    /// Flag types this target cannot represent. Such flags are skipped.
    fn unsupported_types(&self) -> &'static [FlagType];

    /// SDK discriminator for a flag type, e.g. `Boolean` in `getBooleanValue`.
    fn runtime_type(&self, flag_type: FlagType) -> Option<&'static str>;

    /// Target-language type name for a flag type.
    fn native_type(&self, flag_type: FlagType) -> Option<&'static str>;

    /// Target-language literal for a flag's default value.
    fn default_literal(&self, flag: &Flag) -> Result<String, LiteralError>;

    /// Parameters this backend accepts. Defaults fill anything unset.
    fn parameters(&self) -> &'static [ParamSpec] {
        &[]
    }

    /// Import lines or symbols the templates need for these flags.
    fn imports(&self, _flagset: &Flagset) -> Vec<String> {
        Vec::new()
    }

    /// Files to render, given fully resolved parameters.
    fn templates(&self, params: &GeneratorParams) -> Vec<TemplateFile>;
}
