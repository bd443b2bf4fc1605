//! Command-line behaviour against a small asset tree

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn guid(c: char) -> String {
    c.to_string().repeat(32)
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Scene -> Hero.prefab -> Hero.mat -> hero.png, plus Scene -> hero.png
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let meta = |g: char| format!("fileFormatVersion: 2\nguid: {}\n", guid(g));
    let refs = |gs: &[char]| {
        gs.iter()
            .map(|g| format!("  m_Ref: {{fileID: 1, guid: {}, type: 2}}\n", guid(*g)))
            .collect::<String>()
    };

    write(root, "Assets/Main.unity", &refs(&['b', 'd']));
    write(root, "Assets/Main.unity.meta", &meta('a'));
    write(root, "Assets/Hero.prefab", &refs(&['c']));
    write(root, "Assets/Hero.prefab.meta", &meta('b'));
    write(root, "Assets/Hero.mat", &refs(&['d']));
    write(root, "Assets/Hero.mat.meta", &meta('c'));
    write(root, "Assets/hero.png", "binary-ish");
    write(root, "Assets/hero.png.meta", &meta('d'));
    dir
}

fn refgraph(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("refgraph").unwrap();
    cmd.env("REFGRAPH_CONFIG", project.path().join("refgraph.toml"))
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(project.path());
    cmd
}

#[test]
fn scan_reports_counts() {
    let dir = project();
    refgraph(&dir)
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:               4"))
        .stdout(predicate::str::contains("Edges:               4"))
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn scan_json() {
    let dir = project();
    let output = refgraph(&dir)
        .args(["--format", "json", "scan"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["nodes"], 4);
    assert_eq!(report["completed"], true);
    assert_eq!(report["stats"]["metadata_files"], 4);
}

#[test]
fn deps_by_path() {
    let dir = project();
    refgraph(&dir)
        .args(["deps", "Assets/Main.unity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets/Hero.prefab"))
        .stdout(predicate::str::contains("Assets/Hero.mat"))
        .stdout(predicate::str::contains("Assets/hero.png"));
}

#[test]
fn dependents_with_depth_limit() {
    let dir = project();
    refgraph(&dir)
        .args(["dependents", &guid('d'), "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assets/Hero.mat"))
        .stdout(predicate::str::contains("depth limit reached"));
}

#[test]
fn traverse_json_has_steps() {
    let dir = project();
    let output = refgraph(&dir)
        .args(["--format", "json", "traverse", "Assets/Hero.prefab", "--direction", "outgoing"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = view["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["kind"], "node");
    assert_eq!(steps[0]["path"], "Assets/Hero.mat");
    assert_eq!(steps[1]["depth"], 1);
}

#[test]
fn show_lists_both_directions() {
    let dir = project();
    refgraph(&dir)
        .args(["show", "Assets/Hero.prefab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Depends on (1)"))
        .stdout(predicate::str::contains("Depended on by (1)"));
}

#[test]
fn unknown_asset_fails() {
    let dir = project();
    refgraph(&dir)
        .args(["deps", "Assets/Missing.prefab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn depth_over_limit_fails() {
    let dir = project();
    refgraph(&dir)
        .args(["deps", "Assets/Main.unity", "--depth", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Traversal depth too large"));
}

#[test]
fn missing_root_fails() {
    let dir = project();
    let mut cmd = Command::cargo_bin("refgraph").unwrap();
    cmd.env("REFGRAPH_CONFIG", dir.path().join("refgraph.toml"))
        .arg("--root")
        .arg(dir.path().join("nope"))
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Scan root not found"));
}

#[test]
fn config_set_changes_default_depth() {
    let dir = project();
    refgraph(&dir)
        .args(["config", "set", "default_depth", "1"])
        .assert()
        .success();
    refgraph(&dir)
        .args(["config", "get", "default_depth"])
        .assert()
        .success()
        .stdout("1\n");
    refgraph(&dir)
        .args(["deps", "Assets/Main.unity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("depth limit reached"));
}

#[test]
fn config_set_echoes_normalized_extensions() {
    let dir = project();
    refgraph(&dir)
        .args(["config", "set", "reference_extensions", " prefab, ,mat "])
        .assert()
        .success()
        .stdout("reference_extensions = prefab,mat\n");
    refgraph(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[scan]"))
        .stdout(predicate::str::contains("2 type(s): prefab, mat"));
}

#[test]
fn config_init_reports_extensions_and_refuses_overwrite() {
    let dir = project();
    refgraph(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unity, prefab"));
    refgraph(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn config_set_rejects_invalid_depth() {
    let dir = project();
    refgraph(&dir)
        .args(["config", "set", "default_depth", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Traversal depth too large"));
}

#[test]
fn completions_generate() {
    let dir = project();
    refgraph(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("refgraph"));
}
