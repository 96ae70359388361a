//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ofgen_output::ColorMode;

use crate::commands::compare::CompareArgs;
use crate::commands::generate::GenerateArgs;
use crate::commands::init::InitArgs;

/// Generate typesafe OpenFeature flag accessors from a flag manifest.
#[derive(Parser, Debug)]
#[command(name = "ofgen", version, about, propagate_version = true)]
pub struct Cli {
    /// Path to the flag manifest [default: flags.json]
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// When to use colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty flag manifest
    Init(InitArgs),
    /// Generate typesafe accessors for a target, or list targets
    Generate(GenerateArgs),
    /// Compare two flag manifests
    Compare(CompareArgs),
}
