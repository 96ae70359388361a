//! Backend-agnostic rendering of flag accessors.
//!
//! A [`Generator`] pairs one backend with a flagset already filtered to the
//! types that backend supports. Rendering happens entirely in memory; files
//! are written only after every template rendered.
//!
//! Templates are handlebars in strict mode with HTML escaping off. They see:
//!
//! - `flags`: the filtered flags (`key`, `type`, `description`, `defaultValue`)
//! - `params.outputPath` and `params.custom.<name>` (backend parameters)
//! - `imports`: backend-assembled import lines or symbols
//! - `target`, `language`
//!
//! and these helpers:
//!
//! - case: `toPascal`, `toCamel`, `toKebab`, `toSnake`, `toScreamingKebab`,
//!   `toScreamingSnake`, `toUpper`, `toLower`, `title`
//! - quoting: `quote` (strings only), `quoteString` (quotes strings, passes
//!   other values through as JSON)
//! - backend: `runtimeType type`, `nativeType type`, `defaultLiteral flag`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason, no_escape,
};
use ofgen_manifest::{FileStore, StoreError};
use serde::Serialize;

use crate::cancel::{CancelToken, Cancelled};
use crate::case;
use crate::events::{Event, Reporter};
use crate::input::{LoadError, load_path};
use crate::ir::{Flag, FlagType, Flagset};
use crate::traits::{Backend, LiteralError};

/// Output location plus backend parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorParams {
    pub output_path: PathBuf,
    pub custom: BTreeMap<String, String>,
}

impl GeneratorParams {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            custom: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.custom.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.custom.get(name).map(String::as_str)
    }

    /// A copy with every parameter `backend` declares present, using the
    /// declared default where unset.
    pub fn resolved(&self, backend: &dyn Backend) -> Self {
        let mut params = self.clone();
        for spec in backend.parameters() {
            params
                .custom
                .entry(spec.name.to_string())
                .or_insert_with(|| spec.default.to_string());
        }
        params
    }
}

/// A file rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("{target}: template {template}: {message}")]
    Template {
        target: &'static str,
        template: String,
        message: String,
    },
    #[error("{target}: {source}")]
    Literal {
        target: &'static str,
        source: LiteralError,
    },
    #[error(transparent)]
    Io(#[from] StoreError),
    #[error("generation cancelled")]
    Cancelled,
}

impl From<Cancelled> for GenerateError {
    fn from(_: Cancelled) -> Self {
        GenerateError::Cancelled
    }
}

#[derive(Serialize)]
struct TemplateData<'d> {
    target: &'static str,
    language: &'static str,
    flags: &'d [Flag],
    imports: Vec<String>,
    params: &'d GeneratorParams,
}

type StringFn = fn(&str) -> String;

const STRING_HELPERS: &[(&str, StringFn)] = &[
    ("toPascal", case::to_pascal),
    ("toCamel", case::to_camel),
    ("toKebab", case::to_kebab),
    ("toSnake", case::to_snake),
    ("toScreamingKebab", case::to_screaming_kebab),
    ("toScreamingSnake", case::to_screaming_snake),
    ("toUpper", case::to_upper),
    ("toLower", case::to_lower),
    ("title", case::title),
    ("quote", case::quote),
    ("comment", case::comment),
    ("docstring", case::docstring),
];

/// Renders one backend's files for a flagset.
pub struct Generator<'a> {
    backend: &'a dyn Backend,
    flagset: Flagset,
    skipped: Vec<String>,
}

impl<'a> Generator<'a> {
    /// Drops flags whose types `backend` does not support.
    pub fn new(backend: &'a dyn Backend, flagset: &Flagset) -> Self {
        let unsupported = backend.unsupported_types();
        let skipped = flagset
            .iter()
            .filter(|f| unsupported.contains(&f.flag_type))
            .map(|f| f.key.clone())
            .collect();
        Self {
            backend,
            flagset: flagset.filter(unsupported),
            skipped,
        }
    }

    pub fn backend(&self) -> &'a dyn Backend {
        self.backend
    }

    /// The flags that will be rendered.
    pub fn flagset(&self) -> &Flagset {
        &self.flagset
    }

    /// Keys of flags dropped for having unsupported types.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Render every backend template in memory.
    pub fn render(&self, params: &GeneratorParams) -> Result<Vec<RenderedFile>, GenerateError> {
        let target = self.backend.name();
        let params = params.resolved(self.backend);

        // Fail on unrepresentable defaults before any template runs.
        for flag in &self.flagset {
            self.backend
                .default_literal(flag)
                .map_err(|source| GenerateError::Literal { target, source })?;
        }

        let data = TemplateData {
            target,
            language: self.backend.language(),
            flags: self.flagset.flags(),
            imports: self.backend.imports(&self.flagset),
            params: &params,
        };

        let mut registry = self.registry();
        let templates = self.backend.templates(&params);
        let mut files = Vec::with_capacity(templates.len());
        for template in templates {
            let template_error = |message: String| GenerateError::Template {
                target,
                template: template.name.clone(),
                message,
            };
            registry
                .register_template_string(&template.name, template.source)
                .map_err(|e| template_error(e.to_string()))?;
            let contents = registry
                .render(&template.name, &data)
                .map_err(|e| template_error(e.to_string()))?;
            tracing::debug!(
                backend = target,
                template = %template.name,
                bytes = contents.len(),
                "rendered template"
            );
            files.push(RenderedFile {
                path: params.output_path.join(&template.name),
                contents,
            });
        }
        Ok(files)
    }

    /// Render, then write every file through `store`.
    ///
    /// Nothing is written unless all templates render. `cancel` is checked
    /// before each write.
    pub fn generate(
        &self,
        params: &GeneratorParams,
        store: &dyn FileStore,
        reporter: &dyn Reporter,
        cancel: &CancelToken,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let target = self.backend.name();
        reporter.report(Event::GenerationStarted {
            target: target.to_string(),
            language: self.backend.language().to_string(),
        });
        if !self.skipped.is_empty() {
            tracing::warn!(
                backend = target,
                flags = ?self.skipped,
                "skipping flags with types this target does not support"
            );
            reporter.report(Event::FlagsSkipped {
                target: target.to_string(),
                keys: self.skipped.clone(),
            });
        }

        let files = self.render(params)?;

        let mut written = Vec::with_capacity(files.len());
        for file in files {
            cancel.check()?;
            if let Err(err) = store.write(&file.path, file.contents.as_bytes()) {
                reporter.report(Event::FileFailed {
                    path: file.path.clone(),
                    error: err.to_string(),
                });
                return Err(err.into());
            }
            reporter.report(Event::FileCreated {
                path: file.path.clone(),
            });
            written.push(file.path);
        }

        reporter.report(Event::GenerationComplete {
            target: target.to_string(),
            files: written.len(),
        });
        Ok(written)
    }

    fn registry(&self) -> Handlebars<'a> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true);
        hb.register_escape_fn(no_escape);

        for &(name, convert) in STRING_HELPERS {
            hb.register_helper(
                name,
                Box::new(
                    move |h: &Helper,
                          _: &Handlebars,
                          _: &Context,
                          _: &mut RenderContext,
                          out: &mut dyn Output|
                          -> HelperResult {
                        let value = first_param(h, name)?;
                        let Some(text) = value.as_str() else {
                            return Err(fail(format!("{name}: expected a string, got {value}")));
                        };
                        out.write(&convert(text))?;
                        Ok(())
                    },
                ),
            );
        }
        hb.register_helper("quoteString", Box::new(quote_string_helper));

        let backend = self.backend;
        hb.register_helper(
            "runtimeType",
            Box::new(
                move |h: &Helper,
                      _: &Handlebars,
                      _: &Context,
                      _: &mut RenderContext,
                      out: &mut dyn Output|
                      -> HelperResult {
                    let flag_type = flag_type_param(h, "runtimeType")?;
                    let token = backend
                        .runtime_type(flag_type)
                        .ok_or_else(|| unmapped(backend, "runtimeType", flag_type))?;
                    out.write(token)?;
                    Ok(())
                },
            ),
        );
        hb.register_helper(
            "nativeType",
            Box::new(
                move |h: &Helper,
                      _: &Handlebars,
                      _: &Context,
                      _: &mut RenderContext,
                      out: &mut dyn Output|
                      -> HelperResult {
                    let flag_type = flag_type_param(h, "nativeType")?;
                    let native = backend
                        .native_type(flag_type)
                        .ok_or_else(|| unmapped(backend, "nativeType", flag_type))?;
                    out.write(native)?;
                    Ok(())
                },
            ),
        );
        hb.register_helper(
            "defaultLiteral",
            Box::new(
                move |h: &Helper,
                      _: &Handlebars,
                      _: &Context,
                      _: &mut RenderContext,
                      out: &mut dyn Output|
                      -> HelperResult {
                    let value = first_param(h, "defaultLiteral")?;
                    let flag: Flag = serde_json::from_value(value.clone())
                        .map_err(|e| fail(format!("defaultLiteral: expected a flag: {e}")))?;
                    let literal = backend
                        .default_literal(&flag)
                        .map_err(|e| fail(e.to_string()))?;
                    out.write(&literal)?;
                    Ok(())
                },
            ),
        );

        hb
    }
}

fn fail(message: String) -> RenderError {
    RenderErrorReason::Other(message).into()
}

fn first_param<'h>(h: &'h Helper, helper: &str) -> Result<&'h serde_json::Value, RenderError> {
    h.param(0)
        .map(|p| p.value())
        .ok_or_else(|| fail(format!("{helper}: missing parameter")))
}

fn flag_type_param(h: &Helper, helper: &str) -> Result<FlagType, RenderError> {
    let value = first_param(h, helper)?;
    let Some(name) = value.as_str() else {
        return Err(fail(format!("{helper}: expected a flag type, got {value}")));
    };
    FlagType::from_manifest(name).ok_or_else(|| fail(format!("{helper}: unknown flag type `{name}`")))
}

fn unmapped(backend: &dyn Backend, helper: &str, flag_type: FlagType) -> RenderError {
    fail(format!(
        "{helper}: {} has no mapping for {flag_type} flags",
        backend.name()
    ))
}

fn quote_string_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = first_param(h, "quoteString")?;
    match value.as_str() {
        Some(text) => out.write(&case::quote(text))?,
        None => out.write(&value.to_string())?,
    }
    Ok(())
}

/// Load the manifest at `manifest` and generate `backend`'s files.
///
/// `cancel` is checked before the manifest is read and before each write.
pub fn generate_from_manifest(
    backend: &dyn Backend,
    store: &dyn FileStore,
    manifest: &Path,
    params: &GeneratorParams,
    reporter: &dyn Reporter,
    cancel: &CancelToken,
) -> Result<Vec<PathBuf>, GenerateError> {
    cancel.check()?;
    let flagset = load_path(store, manifest)?;
    Generator::new(backend, &flagset).generate(params, store, reporter, cancel)
}
