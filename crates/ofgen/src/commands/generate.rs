//! Generate typesafe flag accessors, or list the available targets.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use ofgen_manifest::OsFileStore;
use ofgen_output::{OutputFormat, OutputFormatter};
use ofgen_typegen::{Backend, BackendRegistry, CancelToken, GeneratorParams, generate_from_manifest};
use serde::Serialize;

use crate::Session;
use crate::config::OfgenConfig;
use crate::reporter::ConsoleReporter;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Target to generate for; lists the available targets when omitted
    pub target: Option<String>,

    /// Output directory [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package name (go, java)
    #[arg(long)]
    pub package_name: Option<String>,

    /// Namespace (csharp)
    #[arg(long)]
    pub namespace: Option<String>,
}

impl GenerateArgs {
    /// Backend parameters given on the command line.
    fn cli_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("package-name", self.package_name.as_deref()),
            ("namespace", self.namespace.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct TargetInfo {
    pub name: String,
    pub language: String,
    pub stability: String,
    pub description: String,
}

/// Every registered target.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct TargetList {
    pub targets: Vec<TargetInfo>,
}

impl TargetList {
    pub fn from_registry(registry: &BackendRegistry) -> Self {
        let targets = registry
            .backends()
            .map(|b| TargetInfo {
                name: b.name().to_string(),
                language: b.language().to_string(),
                stability: b.stability().to_string(),
                description: b.description().to_string(),
            })
            .collect();
        Self { targets }
    }
}

impl OutputFormatter for TargetList {
    fn format_text(&self) -> String {
        let name_width = self.targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
        let mut lines = vec!["Available targets:".to_string()];
        for t in &self.targets {
            lines.push(format!(
                "  {:<name_width$}  {:<6}  {}",
                t.name, t.stability, t.description
            ));
        }
        lines.join("\n")
    }
}

/// Resolve the output directory and backend parameters for `backend`.
///
/// Command-line values win over config, config over the backend's defaults.
/// Returns the names of command-line parameters the backend does not accept.
pub fn resolve_params(
    backend: &dyn Backend,
    args: &GenerateArgs,
    config: &OfgenConfig,
) -> (GeneratorParams, Vec<&'static str>) {
    let scope = ["generate", backend.name()];
    let output = args
        .output
        .clone()
        .or_else(|| config.lookup_str(&scope, "output").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let cli = args.cli_params();
    let ignored = cli
        .iter()
        .filter(|(name, _)| !backend.parameters().iter().any(|p| p.name == *name))
        .map(|(name, _)| *name)
        .collect();

    let mut params = GeneratorParams::new(output);
    for spec in backend.parameters() {
        let value = cli
            .iter()
            .find(|(name, _)| *name == spec.name)
            .map(|(_, v)| v.to_string())
            .or_else(|| config.lookup_str(&scope, spec.name));
        if let Some(value) = value {
            params.set(spec.name, value);
        }
    }
    (params.resolved(backend), ignored)
}

pub fn run(session: &Session, args: GenerateArgs) -> anyhow::Result<()> {
    let registry = BackendRegistry::with_builtins();
    let Some(target) = args.target.as_deref() else {
        TargetList::from_registry(&registry).print(OutputFormat::Flat, session.colors)?;
        return Ok(());
    };
    let backend = registry.get(target).with_context(|| {
        format!(
            "unknown target `{target}`. Available targets: {}",
            registry.names().join(", ")
        )
    })?;

    let console = ConsoleReporter::new(session.colors);
    let (params, ignored) = resolve_params(backend, &args, &session.config);
    for name in ignored {
        console.warning(&format!("--{name} is ignored by the {target} target"));
    }
    tracing::debug!(backend = target, params = ?params, "resolved generator parameters");

    let cancel = CancelToken::new();
    generate_from_manifest(
        backend,
        &OsFileStore,
        &session.manifest,
        &params,
        &console,
        &cancel,
    )
    .with_context(|| format!("failed to generate {target} client"))?;
    Ok(())
}
