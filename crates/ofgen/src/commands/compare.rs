//! Compare two flag manifests.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use nu_ansi_term::Color;
use ofgen_manifest::{Change, ChangeKind, FileStore, Manifest, OsFileStore, Value, compare};
use ofgen_output::{OutputFormat, OutputFormatter, indent, paint, print_output_schema};
use serde::Serialize;

use crate::Session;
use crate::reporter::ConsoleReporter;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Manifest to compare against
    #[arg(short, long, required_unless_present = "output_schema")]
    pub against: Option<PathBuf>,

    /// Output format: tree, flat, json, yaml [default: tree]
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Print the JSON schema of the structured output and exit
    #[arg(long)]
    pub output_schema: bool,
}

/// Differences grouped by kind, each group sorted by path.
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub total_changes: usize,
    pub additions: Vec<Change>,
    pub removals: Vec<Change>,
    pub modifications: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiffOutcome {
    NoDifferences,
    Differences(DiffReport),
}

impl DiffOutcome {
    pub fn from_changes(mut changes: Vec<Change>) -> Self {
        if changes.is_empty() {
            return DiffOutcome::NoDifferences;
        }
        changes.sort_by(|a, b| a.path.cmp(&b.path));
        let total_changes = changes.len();
        let (mut additions, mut removals, mut modifications) = (Vec::new(), Vec::new(), Vec::new());
        for change in changes {
            match change.kind {
                ChangeKind::Addition => additions.push(change),
                ChangeKind::Removal => removals.push(change),
                ChangeKind::Modification => modifications.push(change),
            }
        }
        DiffOutcome::Differences(DiffReport {
            total_changes,
            additions,
            removals,
            modifications,
        })
    }
}

impl DiffReport {
    fn header(&self) -> String {
        format!(
            "Found {} difference(s) between manifests:",
            self.total_changes
        )
    }

    /// Every change, sorted by path.
    pub fn changes(&self) -> Vec<&Change> {
        let mut all: Vec<&Change> = self
            .additions
            .iter()
            .chain(&self.removals)
            .chain(&self.modifications)
            .collect();
        all.sort_by(|a, b| a.path.cmp(&b.path));
        all
    }
}

fn marker(kind: ChangeKind) -> (char, Color) {
    match kind {
        ChangeKind::Addition => ('+', Color::Green),
        ChangeKind::Removal => ('-', Color::Red),
        ChangeKind::Modification => ('~', Color::Yellow),
    }
}

fn pretty_value(value: Option<&Value>) -> String {
    value
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_else(|| "null".to_string())
}

impl OutputFormatter for DiffReport {
    fn format_text(&self) -> String {
        let mut lines = vec![self.header(), String::new()];
        for change in self.changes() {
            let (symbol, _) = marker(change.kind);
            lines.push(format!("{symbol} {}", change.key()));
        }
        lines.join("\n")
    }

    fn format_pretty(&self, colors: bool) -> String {
        let mut lines = vec![self.header(), String::new()];
        let groups = [
            ("Additions", ChangeKind::Addition, &self.additions),
            ("Removals", ChangeKind::Removal, &self.removals),
            ("Modifications", ChangeKind::Modification, &self.modifications),
        ];
        for (title, kind, changes) in groups {
            if changes.is_empty() {
                continue;
            }
            let (symbol, color) = marker(kind);
            lines.push(paint(color, format!("◆ {title}:"), colors));
            for change in changes {
                lines.push(paint(color, format!("  {symbol} {}", change.key()), colors));
                match kind {
                    ChangeKind::Addition => {
                        lines.push(indent(&pretty_value(change.new_value.as_ref()), 4));
                    }
                    ChangeKind::Removal => {
                        lines.push(indent(&pretty_value(change.old_value.as_ref()), 4));
                    }
                    ChangeKind::Modification => {
                        lines.push("    Before:".to_string());
                        lines.push(indent(&pretty_value(change.old_value.as_ref()), 6));
                        lines.push("    After:".to_string());
                        lines.push(indent(&pretty_value(change.new_value.as_ref()), 6));
                    }
                }
            }
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}

fn read_manifest(store: &dyn FileStore, path: &Path, role: &str) -> anyhow::Result<Manifest> {
    let data = store
        .read(path)
        .with_context(|| format!("error loading {role} manifest"))?;
    Manifest::from_slice(&data)
        .with_context(|| format!("error loading {role} manifest {}", path.display()))
}

/// Load both manifests and diff them, `source` against `target`.
pub fn diff_files(
    store: &dyn FileStore,
    source: &Path,
    target: &Path,
) -> anyhow::Result<DiffOutcome> {
    let source_manifest = read_manifest(store, source, "source")?;
    let target_manifest = read_manifest(store, target, "target")?;
    let changes = compare(&source_manifest, &target_manifest);
    tracing::debug!(changes = changes.len(), "compared manifests");
    Ok(DiffOutcome::from_changes(changes))
}

pub fn run(session: &Session, args: CompareArgs) -> anyhow::Result<()> {
    if args.output_schema {
        print_output_schema::<DiffReport>()?;
        return Ok(());
    }
    let Some(against) = args.against else {
        anyhow::bail!("both source (--manifest) and target (--against) paths are required");
    };

    let format = match args.output {
        Some(format) => format,
        None => match session.config.lookup_str(&["compare"], "output") {
            Some(name) => name.parse().map_err(anyhow::Error::msg)?,
            None => OutputFormat::default(),
        },
    };

    match diff_files(&OsFileStore, &session.manifest, &against)? {
        DiffOutcome::NoDifferences => {
            ConsoleReporter::new(session.colors)
                .success("No differences found between the manifests.");
        }
        DiffOutcome::Differences(report) => report.print(format, session.colors)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofgen_manifest::MemoryFileStore;
    use serde_json::json;

    fn manifest(flags: serde_json::Value) -> String {
        json!({ "flags": flags }).to_string()
    }

    fn store() -> MemoryFileStore {
        MemoryFileStore::new()
            .with_file(
                "old.json",
                manifest(json!({
                    "flag1": {"flagType": "boolean", "defaultValue": true},
                    "flag2": {"flagType": "string", "defaultValue": "a"}
                })),
            )
            .with_file(
                "new.json",
                manifest(json!({
                    "flag1": {"flagType": "boolean", "defaultValue": true},
                    "flag2": {"flagType": "string", "defaultValue": "b"},
                    "flag3": {"flagType": "integer", "defaultValue": 1}
                })),
            )
    }

    fn report() -> DiffReport {
        match diff_files(&store(), Path::new("old.json"), Path::new("new.json")).unwrap() {
            DiffOutcome::Differences(report) => report,
            DiffOutcome::NoDifferences => panic!("expected differences"),
        }
    }

    #[test]
    fn test_identical_manifests() {
        let outcome = diff_files(&store(), Path::new("old.json"), Path::new("old.json")).unwrap();
        assert_eq!(outcome, DiffOutcome::NoDifferences);
    }

    #[test]
    fn test_report_groups() {
        let report = report();
        assert_eq!(report.total_changes, 2);
        assert_eq!(report.additions.len(), 1);
        assert!(report.removals.is_empty());
        assert_eq!(report.modifications[0].path, "flags.flag2");
    }

    #[test]
    fn test_flat_output() {
        assert_eq!(
            report().format_text(),
            "Found 2 difference(s) between manifests:\n\n~ flag2\n+ flag3"
        );
    }

    #[test]
    fn test_tree_output() {
        let expected = [
            "Found 2 difference(s) between manifests:",
            "",
            "◆ Additions:",
            "  + flag3",
            "    {",
            "      \"defaultValue\": 1,",
            "      \"flagType\": \"integer\"",
            "    }",
            "",
            "◆ Modifications:",
            "  ~ flag2",
            "    Before:",
            "      {",
            "        \"defaultValue\": \"a\",",
            "        \"flagType\": \"string\"",
            "      }",
            "    After:",
            "      {",
            "        \"defaultValue\": \"b\",",
            "        \"flagType\": \"string\"",
            "      }",
        ]
        .join("\n");
        assert_eq!(report().format_pretty(false), expected);
    }

    #[test]
    fn test_json_output() {
        let rendered = report().render(OutputFormat::Json, false).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["totalChanges"], 2);
        assert_eq!(parsed["additions"][0]["type"], "add");
        assert_eq!(parsed["additions"][0]["path"], "flags.flag3");
        assert_eq!(parsed["modifications"][0]["oldValue"]["defaultValue"], "a");
        assert_eq!(parsed["removals"], json!([]));
    }

    #[test]
    fn test_yaml_output() {
        let rendered = report().render(OutputFormat::Yaml, false).unwrap();
        assert!(rendered.starts_with("totalChanges: 2\n"));
        assert!(rendered.contains("path: flags.flag3"));
    }

    #[test]
    fn test_malformed_manifest() {
        let store = store().with_file("bad.json", "{");
        let err = diff_files(&store, Path::new("bad.json"), Path::new("old.json")).unwrap_err();
        assert!(format!("{err:#}").contains("error loading source manifest bad.json"));
    }
}
