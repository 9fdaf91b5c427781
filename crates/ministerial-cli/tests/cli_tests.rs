//! Runs the `ministerial` binary against a temporary database

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "students": [
        { "id": "paulo", "name": "Paulo", "gender": "male", "age": 48, "role": "elder" },
        { "id": "clara", "name": "Clara", "gender": "female", "age": 22, "parent_id": "paulo" },
        { "id": "lucas", "name": "Lucas", "gender": "male", "age": 15, "parent_id": "paulo" },
        { "id": "marta", "name": "Marta", "gender": "female", "age": 35 }
    ],
    "family_links": [
        { "student_id": "clara", "name": "Lucas", "relation": "Irmão" }
    ]
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[settings]\ncolor = false\n").unwrap();
        fs::write(dir.path().join("snapshot.json"), SNAPSHOT).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ministerial"))
            .arg("--config")
            .arg(self.path("config.toml"))
            .arg("--db")
            .arg(self.path("ministerial.db"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn import(&self) {
        let snapshot = self.path("snapshot.json");
        let output = self.run(&["import", path_str(&snapshot)]);
        assert!(output.status.success(), "{}", stderr(&output));
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn validate_prints_quiet_verdict() {
    let ws = Workspace::new();
    ws.import();

    let output = ws.run(&["--format", "quiet", "validate", "paulo", "clara"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "valid");

    let output = ws.run(&["--format", "quiet", "validate", "lucas", "clara"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "invalid");
}

#[test]
fn validate_json_carries_reason() {
    let ws = Workspace::new();
    ws.import();

    let output = ws.run(&["--format", "json", "validate", "paulo", "marta"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["decision"]["valid"], false);
    assert_eq!(
        value["decision"]["reason"],
        "different genders without verified family relationship"
    );
}

#[test]
fn audit_exits_with_two_on_invalid_pairs() {
    let ws = Workspace::new();
    ws.import();

    let clean = ws.write("clean.json", r#"[{ "a": "paulo", "b": "lucas" }]"#);
    let output = ws.run(&["--format", "quiet", "audit", path_str(&clean)]);
    assert_eq!(output.status.code(), Some(0));

    let dirty = ws.write(
        "dirty.json",
        r#"[{ "a": "paulo", "b": "lucas" }, { "a": "marta", "b": "lucas" }]"#,
    );
    let output = ws.run(&["--format", "quiet", "audit", path_str(&dirty)]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "marta lucas");
}

#[test]
fn candidates_lists_eligible_helpers() {
    let ws = Workspace::new();
    ws.import();

    let output = ws.run(&[
        "--format", "quiet", "candidates", "paulo", "clara", "lucas", "marta",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "clara\nlucas");
}

#[test]
fn stats_reflect_import() {
    let ws = Workspace::new();
    ws.import();

    let output = ws.run(&["--format", "json", "stats"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["student_count"], 4);
    assert_eq!(value["family_link_count"], 1);
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::new();
    let output = Command::new(env!("CARGO_BIN_EXE_ministerial"))
        .arg("--config")
        .arg(ws.path("absent.toml"))
        .arg("--db")
        .arg(ws.path("ministerial.db"))
        .arg("stats")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}
