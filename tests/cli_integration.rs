//! CLI integration tests for gowork-depgraph.
//!
//! These tests run the binary against Go workspaces written to temp dirs.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the gowork-depgraph binary command.
fn depgraph() -> Command {
    let mut cmd = Command::cargo_bin("gowork-depgraph").unwrap();
    cmd.arg("--no-color");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `./svc` requires `example.com/lib`; `svc/handler` imports `lib/util`.
fn service_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "go.work", "go 1.22\n\nuse (\n\t./svc\n\t./lib\n)\n");
    write(
        root,
        "svc/go.mod",
        "module example.com/svc\n\ngo 1.22\n\nrequire example.com/lib v0.0.0\n\nreplace example.com/lib => ../lib\n",
    );
    write(root, "lib/go.mod", "module example.com/lib\n\ngo 1.22\n");
    write(
        root,
        "svc/main.go",
        "package main\n\nimport (\n\t\"fmt\"\n\n\t\"example.com/svc/handler\"\n)\n\nfunc main() { fmt.Println(handler.Name) }\n",
    );
    write(
        root,
        "svc/handler/handler.go",
        "package handler\n\nimport \"example.com/lib/util\"\n\nvar Name = util.Name\n",
    );
    write(
        root,
        "lib/util/util.go",
        "package util\n\nimport \"strings\"\n\nvar Name = strings.ToUpper(\"x\")\n",
    );

    tmp
}

// ============================================================================
// gowork-depgraph packages
// ============================================================================

#[test]
fn test_packages_json() {
    let tmp = service_workspace();

    let output = depgraph()
        .args(["packages", "--format", "json"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let map: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        map,
        serde_json::json!({
            "example.com/lib/util": [],
            "example.com/svc": ["example.com/svc/handler"],
            "example.com/svc/handler": ["example.com/lib/util"],
        })
    );
}

#[test]
fn test_packages_text_defaults_to_current_directory() {
    let tmp = service_workspace();

    depgraph()
        .arg("packages")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "example.com/svc/handler\n└── example.com/lib/util\n",
        ));
}

#[test]
fn test_packages_strict_fails_on_warnings() {
    let tmp = service_workspace();
    write(tmp.path(), "lib/util/broken.go", "not a go file\n");

    depgraph()
        .arg("packages")
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: skipped source file"));

    depgraph()
        .args(["packages", "--strict"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--strict"));
}

// ============================================================================
// gowork-depgraph modules
// ============================================================================

#[test]
fn test_modules_json() {
    let tmp = service_workspace();

    depgraph()
        .args(["modules", "--format", "json"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./svc\": [\n    \"./lib\"\n  ]"));
}

#[test]
fn test_modules_cycle_fails() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "go.work", "go 1.22\n\nuse ./a\nuse ./b\n");
    write(root, "a/go.mod", "module example.com/a\n\nrequire example.com/b v0.0.0\n");
    write(root, "b/go.mod", "module example.com/b\n\nrequire example.com/a v0.0.0\n");

    depgraph()
        .arg("modules")
        .arg(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to add dependency ./b -> ./a"));
}

// ============================================================================
// errors
// ============================================================================

#[test]
fn test_missing_workspace_fails() {
    let tmp = TempDir::new().unwrap();

    depgraph()
        .arg("packages")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("go.work not found"));
}

#[test]
fn test_bad_module_manifest_shows_location() {
    let tmp = service_workspace();
    write(tmp.path(), "lib/go.mod", "go 1.22\n");

    depgraph()
        .arg("packages")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("no module directive found"));
}

#[test]
fn test_invalid_config_fails() {
    let tmp = service_workspace();
    write(tmp.path(), ".depgraph.toml", "relative-fallback = \"sometimes\"\n");

    depgraph()
        .arg("packages")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

// ============================================================================
// gowork-depgraph fingerprint
// ============================================================================

#[test]
fn test_fingerprint_tracks_imports() {
    let tmp = service_workspace();

    let first = depgraph()
        .arg("fingerprint")
        .arg(tmp.path())
        .output()
        .unwrap();
    let second = depgraph()
        .arg("fingerprint")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(String::from_utf8_lossy(&first.stdout).trim().len(), 64);

    write(
        tmp.path(),
        "lib/util/util.go",
        "package util\n\nimport \"strings\"\nimport \"sort\"\n\nvar Name = strings.ToUpper(\"x\")\n",
    );
    let third = depgraph()
        .arg("fingerprint")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert_ne!(first.stdout, third.stdout);
}

#[test]
fn test_explicit_config_flag() {
    let tmp = service_workspace();
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "include-tests = true\n").unwrap();

    let default = depgraph()
        .arg("fingerprint")
        .arg(tmp.path())
        .output()
        .unwrap();
    let custom = depgraph()
        .arg("--config")
        .arg(&config)
        .arg("fingerprint")
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(custom.status.success());
    assert_ne!(default.stdout, custom.stdout);
}
