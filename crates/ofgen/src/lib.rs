//! The `ofgen` command-line tool.
//!
//! Thin layer over `ofgen-manifest` and `ofgen-typegen`: argument parsing,
//! layered configuration, console reporting and logging.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod reporter;

use std::path::PathBuf;

use anyhow::Context;

use crate::cli::{Cli, Command};
use crate::config::OfgenConfig;

/// Manifest path used when neither `--manifest` nor config names one.
pub const DEFAULT_MANIFEST: &str = "flags.json";

/// Settings shared by every command, resolved from arguments and config.
#[derive(Debug)]
pub struct Session {
    pub manifest: PathBuf,
    pub colors: bool,
    pub config: OfgenConfig,
}

impl Session {
    pub fn new(manifest: Option<PathBuf>, colors: bool, config: OfgenConfig) -> Self {
        let manifest = manifest
            .or_else(|| config.manifest())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
        Self {
            manifest,
            colors,
            config,
        }
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init(cli.debug);

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    let config = OfgenConfig::load(&cwd)?;
    let session = Session::new(cli.manifest, cli.color.use_colors(), config);
    tracing::debug!(manifest = %session.manifest.display(), "resolved manifest path");

    match cli.command {
        Command::Init(args) => commands::init::run(&session, args),
        Command::Generate(args) => commands::generate::run(&session, args),
        Command::Compare(args) => commands::compare::run(&session, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_precedence() {
        let config = OfgenConfig::from_toml("manifest = \"cfg.json\"").unwrap();
        let session = Session::new(Some("cli.json".into()), false, config.clone());
        assert_eq!(session.manifest, PathBuf::from("cli.json"));

        let session = Session::new(None, false, config);
        assert_eq!(session.manifest, PathBuf::from("cfg.json"));

        let session = Session::new(None, false, OfgenConfig::default());
        assert_eq!(session.manifest, PathBuf::from(DEFAULT_MANIFEST));
    }
}
