//! End-to-end tests for the `ofgen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

const MANIFEST: &str = r##"{
  "flags": {
    "enableFeatureA": {
      "flagType": "boolean",
      "defaultValue": false,
      "description": "Controls whether Feature A is enabled."
    },
    "usernameMaxLength": {
      "flagType": "integer",
      "defaultValue": 50
    },
    "themeCustomization": {
      "flagType": "object",
      "defaultValue": {"primaryColor": "#007bff"}
    }
  }
}"##;

/// `ofgen` running in `dir`, isolated from the user's config and log settings.
fn ofgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ofgen").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    String::from_utf8(cmd.assert().success().get_output().stdout.clone()).unwrap()
}

fn stderr_of_failure(cmd: &mut Command) -> String {
    String::from_utf8(cmd.assert().failure().code(1).get_output().stderr.clone()).unwrap()
}

#[test]
fn init_creates_manifest_once() {
    let dir = TempDir::new().unwrap();
    ofgen(dir.path())
        .args(["init", "--manifest", "flags/flags.json"])
        .assert()
        .success();
    let path = dir.path().join("flags/flags.json");
    let created = fs::read_to_string(&path).unwrap();
    assert!(created.contains("\"$schema\""));
    assert!(created.contains("\"flags\": {}"));

    fs::write(&path, MANIFEST).unwrap();
    ofgen(dir.path())
        .args(["init", "--manifest", "flags/flags.json"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), MANIFEST);

    ofgen(dir.path())
        .args(["init", "--manifest", "flags/flags.json", "--override"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), created);
}

#[test]
fn generate_go_writes_accessors() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("flags.json"), MANIFEST).unwrap();

    ofgen(dir.path())
        .args(["generate", "go", "--output", "out"])
        .assert()
        .success();

    let generated = fs::read_to_string(dir.path().join("out/openfeature.go")).unwrap();
    assert!(generated.starts_with("// Code generated by ofgen. DO NOT EDIT."));
    assert!(generated.contains("package openfeature"));
    assert!(generated.contains("EnableFeatureA"));
    assert!(generated.contains("UsernameMaxLength"));
    assert!(!generated.contains("ThemeCustomization"));
}

#[test]
fn generate_uses_project_config() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("flags")).unwrap();
    fs::write(dir.path().join("flags/flags.json"), MANIFEST).unwrap();
    fs::write(
        dir.path().join(".ofgen.toml"),
        "manifest = \"flags/flags.json\"\n\n[generate]\noutput = \"gen\"\n\n[generate.go]\npackage-name = \"flags\"\n",
    )
    .unwrap();

    ofgen(dir.path()).args(["generate", "go"]).assert().success();
    let generated = fs::read_to_string(dir.path().join("gen/flags.go")).unwrap();
    assert!(generated.contains("package flags"));

    ofgen(dir.path())
        .args(["generate", "go", "--package-name", "cli"])
        .assert()
        .success();
    assert!(dir.path().join("gen/cli.go").exists());
}

#[test]
fn generate_without_target_lists_targets() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(ofgen(dir.path()).arg("generate"));
    assert!(out.starts_with("Available targets:"));
    for target in ["csharp", "go", "java", "nestjs", "nodejs", "python", "react"] {
        assert!(out.contains(target), "missing {target} in:\n{out}");
    }
}

#[test]
fn generate_unknown_target_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("flags.json"), MANIFEST).unwrap();
    let err = stderr_of_failure(ofgen(dir.path()).args(["generate", "cobol"]));
    assert!(err.contains("unknown target `cobol`"));
}

#[test]
fn generate_rejects_invalid_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("flags.json"),
        r#"{"flags": {"broken": {"flagType": "boolean", "defaultValue": "yes"}}}"#,
    )
    .unwrap();
    let err = stderr_of_failure(ofgen(dir.path()).args(["generate", "go", "-o", "out"]));
    assert!(err.contains("flag manifest validation failed"));
    assert!(err.contains("flags.broken"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn compare_reports_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("flags.json"), MANIFEST).unwrap();
    fs::write(
        dir.path().join("old.json"),
        r#"{"flags": {"enableFeatureA": {"flagType": "boolean", "defaultValue": true}}}"#,
    )
    .unwrap();

    let out = stdout_of(ofgen(dir.path()).args(["compare", "--against", "old.json", "-o", "json"]));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["totalChanges"], 3);
    assert_eq!(report["removals"][0]["path"], "flags.themeCustomization");
    assert_eq!(report["removals"][1]["path"], "flags.usernameMaxLength");
    assert_eq!(report["modifications"][0]["path"], "flags.enableFeatureA");
}

#[test]
fn compare_identical_manifests() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("flags.json"), MANIFEST).unwrap();
    let assert = ofgen(dir.path())
        .args(["compare", "--against", "flags.json"])
        .assert()
        .success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("No differences found between the manifests."));
}
