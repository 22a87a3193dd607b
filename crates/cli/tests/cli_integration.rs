//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `robolang` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! Tests set `current_dir` to the workspace root so that relative
//! paths to conformance fixtures resolve correctly.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `robolang` binary, rooted at workspace.
fn robolang() -> Command {
    let mut cmd = cargo_bin_cmd!("robolang");
    cmd.current_dir(workspace_root());
    cmd
}

/// Write `content` to `name` inside a fresh temp dir.
fn program(content: &str, name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write program");
    (dir, path)
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    robolang()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Robot control language checker"));
}

#[test]
fn version_exits_0() {
    robolang()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("robolang"));
}

#[test]
fn unknown_subcommand_fails() {
    robolang().arg("frobnicate").assert().failure();
}

// ──────────────────────────────────────────────
// 2. check
// ──────────────────────────────────────────────

#[test]
fn check_positive_fixture_prints_si() {
    robolang()
        .args(["check", "conformance/positive/basic_walk.txt"])
        .assert()
        .success()
        .stdout("si\n");
}

#[test]
fn check_negative_fixture_prints_expected_verdict() {
    let expected = fs::read_to_string(
        workspace_root().join("conformance/negative/duplicate_variable.expected"),
    )
    .expect("expected file");
    robolang()
        .args(["check", "conformance/negative/duplicate_variable.txt"])
        .assert()
        .code(1)
        .stdout(expected);
}

#[test]
fn check_missing_file() {
    robolang()
        .args(["check", "conformance/does_not_exist.txt"])
        .assert()
        .code(1)
        .stdout("file not found: conformance/does_not_exist.txt\n");
}

#[test]
fn check_quiet_prints_nothing_but_keeps_exit_code() {
    let (_dir, path) = program("EXEC { walk(y) }\n", "bad.txt");
    robolang()
        .args(["--quiet", "check"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_json_output() {
    let (_dir, path) = program("EXEC { turnToThe(up) }\n", "bad.txt");
    let output = robolang()
        .args(["--output", "json", "check"])
        .arg(&path)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["verdict"], "no");
    assert_eq!(value["error"]["stage"], "validate");
    assert_eq!(value["error"]["line"], 1);
    assert_eq!(value["error"]["col"], 18);
}

#[test]
fn check_robot_values_flag() {
    let (_dir, path) = program("EXEC { walk(myX) }\n", "prog.txt");
    robolang().arg("check").arg(&path).assert().code(1);
    robolang()
        .args(["--robot-values", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout("si\n");
}

// ──────────────────────────────────────────────
// 3. Configuration
// ──────────────────────────────────────────────

#[test]
fn config_in_cwd_is_picked_up() {
    let (dir, path) = program("EXEC { walk(depth) }\n", "prog.txt");
    fs::write(
        dir.path().join("robolang.toml"),
        "[language]\nbuiltin_values = [\"depth\"]\n",
    )
    .unwrap();
    let mut cmd = cargo_bin_cmd!("robolang");
    cmd.current_dir(dir.path())
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout("si\n");
}

#[test]
fn explicit_config_and_flag_override() {
    let (dir, path) = program("EXEC { nop }\n", "prog.txt");
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    robolang()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"verdict\":\"si\""));

    robolang()
        .arg("--config")
        .arg(&config)
        .args(["--output", "text", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout("si\n");
}

#[test]
fn bad_config_fails() {
    let (dir, path) = program("EXEC { nop }\n", "prog.txt");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[language]\nbuiltin_values = 3\n").unwrap();
    robolang()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not parse"));
}

// ──────────────────────────────────────────────
// 4. ast
// ──────────────────────────────────────────────

#[test]
fn ast_prints_program_json() {
    let (_dir, path) = program("NEW VAR x = 3\nEXEC { walk(x) }\n", "prog.txt");
    let output = robolang().arg("ast").arg(&path).output().expect("run");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["declarations"][0]["kind"], "var");
    assert_eq!(value["declarations"][0]["name"], "x");
    assert_eq!(value["declarations"][0]["value"], 3);
    let stmt = &value["execs"][0]["statements"][0];
    assert_eq!(stmt["kind"], "command");
    assert_eq!(stmt["name"], "walk");
    assert_eq!(stmt["args"][0]["kind"], "var_ref");
}

#[test]
fn ast_does_not_resolve_names() {
    let (_dir, path) = program("EXEC { walk(undeclared) }\n", "prog.txt");
    robolang().arg("ast").arg(&path).assert().success();
}

#[test]
fn ast_syntax_error_exits_1() {
    let (_dir, path) = program("EXEC { walk(1)\n", "prog.txt");
    robolang()
        .arg("ast")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no: line 1, column 6"));
}

#[test]
fn ast_quiet_suppresses_errors_in_both_formats() {
    let (_dir, path) = program("EXEC { walk(1)\n", "prog.txt");
    for format in ["text", "json"] {
        robolang()
            .args(["--quiet", "--output", format, "ast"])
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::is_empty());
    }
}

#[test]
fn ast_json_error_on_stderr() {
    let (_dir, path) = program("EXEC { walk(1)\n", "prog.txt");
    let output = robolang()
        .args(["--output", "json", "ast"])
        .arg(&path)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(value["stage"], "parse");
}

// ──────────────────────────────────────────────
// 5. repl and menu
// ──────────────────────────────────────────────

#[test]
fn repl_verdict_per_line() {
    robolang()
        .arg("repl")
        .write_stdin("NEW VAR x = 3\nEXEC { walk(x) }\n")
        .assert()
        .success()
        .stdout("si\nsi\n");
}

#[test]
fn repl_final_rejection_exits_1() {
    robolang()
        .arg("repl")
        .write_stdin("EXEC { walk(y) }\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unknown identifier 'y'"));
}

#[test]
fn menu_is_the_default() {
    robolang()
        .write_stdin("1\nEXEC { jump(1) }\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Choose (1 or 2)"))
        .stdout(predicate::str::ends_with("si\n"));
}

#[test]
fn menu_file_option() {
    robolang()
        .arg("menu")
        .write_stdin("2\nconformance/negative/unterminated.txt\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "no: line 1, column 6: block opened here is never closed",
        ));
}

#[test]
fn menu_invalid_choice() {
    robolang()
        .arg("menu")
        .write_stdin("7\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid option"));
}
