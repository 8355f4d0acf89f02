use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn cratewalk_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cratewalk").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("CRATEWALK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn offline_args<'a>(tmp: &'a TempDir, package: &'a str) -> Vec<String> {
    vec![
        "graph".to_string(),
        "--package".to_string(),
        package.to_string(),
        "--test-mode".to_string(),
        "--repository".to_string(),
        tmp.path().join("fixtures").display().to_string(),
    ]
}

#[test]
fn test_graph_offline_prints_forward_graph() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "A"))
        .assert()
        .success()
        .stdout(predicate::str::contains("A -> [B, C]"))
        .stdout(predicate::str::contains("E -> [F]"))
        .stdout(predicate::str::contains("Processed packages: 6"));

    assert!(tmp.path().join("fixtures").join("A.json").is_file());
}

#[test]
fn test_graph_offline_reports_cycle() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "serde"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycle: serde -> serde_json -> serde"));
}

#[test]
fn test_graph_offline_filter_and_depth() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "serde"))
        .args(["--filter-substring", "mac", "--max-depth", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("serde_derive -> [quote, syn]"))
        .stdout(predicate::str::contains("proc-macro2").not())
        .stdout(predicate::str::contains("No cyclic dependencies detected"));
}

#[test]
fn test_graph_offline_reverse_and_order() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "F"))
        .args(["--reverse-deps", "--installation-order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Packages depending on F:"))
        .stdout(predicate::str::contains("Total reverse dependencies: 2"))
        .stdout(predicate::str::contains(" 1. F"));
}

#[test]
fn test_graph_dot_output() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "C"))
        .args(["--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"));
}

#[test]
fn test_graph_rejects_zero_depth() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "A"))
        .args(["--max-depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max depth must be a positive integer"));

    assert!(!tmp.path().join("fixtures").exists());
}

#[test]
fn test_graph_rejects_negative_depth() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "A"))
        .args(["--max-depth", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max depth must be a positive integer"));
}

#[test]
fn test_graph_rejects_empty_package() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, ""))
        .assert()
        .failure()
        .stderr(predicate::str::contains("package name must not be empty"));
}

#[test]
fn test_graph_rejects_empty_repository() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(["graph", "--package", "serde", "--repository", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository must not be empty"));
}

#[test]
fn test_graph_requires_package() {
    let tmp = TempDir::new().unwrap();

    cratewalk_cmd(&tmp)
        .args(["graph", "--test-mode"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_sets_default_depth() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("cratewalk.toml");
    std::fs::write(&config, "[walk]\nmax-depth = 1\n").unwrap();

    cratewalk_cmd(&tmp)
        .args(offline_args(&tmp, "A"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Dependency graph (depth: 1) ==="))
        .stdout(predicate::str::contains("Processed packages: 1"));
}
