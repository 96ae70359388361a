//! Create an empty flag manifest.

use anyhow::Context;
use clap::Args;
use ofgen_manifest::{FileStore, Manifest, OsFileStore};

use crate::Session;
use crate::reporter::ConsoleReporter;

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Replace an existing manifest
    #[arg(long = "override")]
    pub override_existing: bool,
}

/// What `init` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Unchanged,
}

pub fn run(session: &Session, args: InitArgs) -> anyhow::Result<()> {
    let console = ConsoleReporter::new(session.colors);
    match init_manifest(&OsFileStore, session, &args)? {
        InitOutcome::Created => {
            console.success(&format!("Created {}", session.manifest.display()));
            console.success("Project initialized.");
        }
        InitOutcome::Unchanged => {
            console.info(&format!(
                "An existing manifest was found at {}. Pass --override to replace it.",
                session.manifest.display()
            ));
            console.info("No changes were made.");
        }
    }
    Ok(())
}

/// Write an empty manifest unless one exists and overriding is off.
pub fn init_manifest(
    store: &dyn FileStore,
    session: &Session,
    args: &InitArgs,
) -> anyhow::Result<InitOutcome> {
    let path = &session.manifest;
    if store.exists(path) && !args.override_existing {
        tracing::debug!(path = %path.display(), "manifest already exists");
        return Ok(InitOutcome::Unchanged);
    }

    let contents = Manifest::empty()
        .to_pretty_json()
        .context("failed to serialize manifest")?;
    store
        .write(path, contents.as_bytes())
        .with_context(|| format!("failed to create manifest {}", path.display()))?;
    Ok(InitOutcome::Created)
}
