use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("cli crate should have parent")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    repo_root()
        .join("crates/yosys-bridge/tests/fixtures")
        .join(name)
}

fn golden(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name)
}

fn n2g() -> Command {
    let mut command = Command::cargo_bin("n2g").expect("binary exists");
    command.env_remove("RUST_LOG");
    command
}

fn stdout_of(args: &[&str]) -> String {
    let output = n2g().args(args).output().expect("run n2g");
    assert!(output.status.success(), "n2g {args:?} failed: {output:?}");
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn full_adder_matches_golden_file() {
    let temp = TempDir::new().expect("temp dir");
    let out = temp.path().join("graphs/full_adder.gml");
    let input = fixture("full_adder.json");

    n2g()
        .args([
            "gml",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).expect("read written graph");
    let expected = fs::read_to_string(golden("full_adder.gml")).expect("read golden graph");
    assert_eq!(written, expected);
}

#[test]
fn and_gate_goes_to_stdout() {
    let input = fixture("and_gate.json");
    let text = stdout_of(&["gml", input.to_str().unwrap()]);

    assert_eq!(text.matches("node [").count(), 3);
    assert_eq!(text.matches("edge [").count(), 2);
    assert!(text.contains("edge [ source 2 target 4 ]"));
    assert!(text.contains("edge [ source 4 target 3 ]"));
    assert!(text.starts_with("graph [\n    multigraph 1\n"));
}

#[test]
fn inert_flags_leave_output_unchanged() {
    let input = fixture("full_adder.json");
    let input = input.to_str().unwrap();

    let plain = stdout_of(&["gml", input]);
    let flagged = stdout_of(&["gml", input, "--aig", "--compat-int"]);
    assert_eq!(plain, flagged);
}

#[test]
fn select_limits_output_to_named_module() {
    let input = fixture("hierarchy.json");
    let text = stdout_of(&["gml", input.to_str().unwrap(), "--select", "top"]);

    assert!(!text.contains("$not$hier.v:2$1"));
    assert!(text.contains("node [ id 4 label \"u0\"\n        type \"inv_cell\""));
    assert!(text.contains("node [ id 5 label \"u1\""));
    assert!(text.contains("edge [ source 4 target 5 ]"));
    assert!(text.contains("edge [ source 2 target 4 ]"));
    assert!(text.contains("edge [ source 5 target 3 ]"));
}

#[test]
fn select_members_drops_unselected_cells() {
    let input = fixture("hierarchy.json");
    let text = stdout_of(&[
        "gml",
        input.to_str().unwrap(),
        "--select",
        "top/x",
        "--select",
        "top/u1",
        "--select",
        "top/mid",
    ]);

    assert_eq!(text.matches("node [").count(), 2);
    assert!(text.contains("node [ id 3 label \"u1\""));
    assert!(!text.contains("edge ["));
}

#[test]
fn processes_fail_the_run() {
    let input = fixture("has_process.json");

    n2g()
        .args(["gml", input.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("module `counter` contains 1 process(es)"));
}

#[test]
fn failed_translation_leaves_no_output_file() {
    let temp = TempDir::new().expect("temp dir");
    let out = temp.path().join("counter.gml");
    let input = fixture("has_process.json");

    n2g()
        .args(["gml", input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn rejects_malformed_selection() {
    let input = fixture("and_gate.json");

    n2g()
        .args(["gml", input.to_str().unwrap(), "--select", "top/a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selection entry"));
}

#[test]
fn reports_missing_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("nope.json");

    n2g()
        .args(["gml", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load netlist"))
        .stderr(predicate::str::contains("caused by"));
}

#[test]
fn output_under_a_regular_file_fails() {
    let temp = TempDir::new().expect("temp dir");
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").expect("write blocker file");
    let out = blocker.join("out.gml");
    let input = fixture("and_gate.json");

    n2g()
        .args(["gml", input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create parent directory"));
    assert_eq!(
        fs::read_to_string(&blocker).expect("read blocker file"),
        "not a directory"
    );
}

#[test]
fn output_path_that_is_a_directory_fails() {
    let temp = TempDir::new().expect("temp dir");
    let input = fixture("and_gate.json");

    n2g()
        .args(["gml", input.to_str().unwrap(), "-o", temp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("for writing"));
}
