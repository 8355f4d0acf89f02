use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn cratewalk_cmd() -> Command {
    Command::cargo_bin("cratewalk").unwrap()
}

#[test]
fn test_fixtures_writes_builtin_graph() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("fx");

    cratewalk_cmd()
        .arg("fixtures")
        .arg(&dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    for name in ["A", "B", "C", "D", "E", "F", "serde", "serde_derive", "serde_json", "tokio"] {
        assert!(dir.join(format!("{name}.json")).is_file(), "missing {name}");
    }
    let a = std::fs::read_to_string(dir.join("A.json")).unwrap();
    assert!(a.contains("\"B\""));
}

#[test]
fn test_fixtures_keeps_existing_without_force() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("A.json"),
        r#"{"package": "A", "dependencies": []}"#,
    )
    .unwrap();

    cratewalk_cmd()
        .arg("fixtures")
        .arg(tmp.path())
        .assert()
        .success();
    let a = std::fs::read_to_string(tmp.path().join("A.json")).unwrap();
    assert!(!a.contains("\"B\""));

    cratewalk_cmd()
        .arg("fixtures")
        .arg(tmp.path())
        .arg("--force")
        .assert()
        .success();
    let a = std::fs::read_to_string(tmp.path().join("A.json")).unwrap();
    assert!(a.contains("\"B\""));
}
