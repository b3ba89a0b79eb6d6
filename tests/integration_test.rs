//! Integration tests for the cobaudit CLI
//!
//! These run the actual binary against a temp fixture to verify:
//! - A full audit produces the expected issues and metrics
//! - JSON output is valid and carries stable field names
//! - Report files are written where asked
//! - Failures abort with a non-zero exit and no partial report
//!
//! Each test uses its own isolated temp directory.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SAMPLE: &str = "\
IDENTIFICATION DIVISION.
PROGRAM-ID. PAYROLL.
* demonstration fixture
DATA DIVISION.
01 WS-COUNTER PIC 9(4).
01 UNUSED-VAR PIC X(10).
05 FILLER
PROCEDURE DIVISION.
MAIN SECTION.
    MOVE 0 TO WS-COUNTER
    IF WS-COUNTER > 100
       GO TO WRAP-UP
    END-IF
WRAP-UP SECTION.
    PERFORM MAIN
IDLE SECTION.
    EXIT.
";

fn cobaudit_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cobaudit"))
}

fn write_sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.cbl");
    std::fs::write(&path, SAMPLE).expect("write fixture");
    path
}

fn run_audit(file: &Path, args: &[&str]) -> (String, String, i32) {
    let mut cmd_args = vec!["audit", file.to_str().unwrap()];
    cmd_args.extend(args);

    let output = Command::new(cobaudit_bin())
        .args(&cmd_args)
        .env_remove("RUST_LOG")
        .env_remove("COBAUDIT_LOG")
        .output()
        .expect("run cobaudit");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

#[test]
fn json_audit_carries_stable_fields_and_expected_findings() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);

    let (stdout, stderr, code) = run_audit(&file, &["-f", "json"]);
    assert_eq!(code, 0, "audit failed: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    let metrics = &parsed["metrics"];
    assert_eq!(metrics["procedures"], 3);
    assert_eq!(metrics["data_items"], 3);
    assert_eq!(metrics["unused_vars"], 1);
    // IDLE has no PERFORM/GO TO entry signal and is not the first section.
    assert_eq!(metrics["dead_code_sections"], 1);
    assert_eq!(metrics["empty_sections"], 1);
    assert_eq!(metrics["magic_numbers"], 1);

    let issues = parsed["issues"].as_array().expect("issues array");
    assert!(issues.iter().any(|i| i["type"] == "best_practice"));
    assert!(issues.iter().any(|i| i["type"] == "unused_variable"
        && i["message"].as_str().unwrap().contains("UNUSED-VAR")));
    assert!(issues.iter().any(|i| i["type"] == "documentation"));
    assert!(issues
        .iter()
        .all(|i| i["severity"].is_string() && i["message"].is_string()));

    let grade = parsed["audit_score"]["grade"].as_str().unwrap();
    assert!(["A", "B", "C", "D", "F"].contains(&grade));
}

#[test]
fn report_is_written_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);
    let out = dir.path().join("report.md");

    let (_, stderr, code) = run_audit(&file, &["-f", "markdown", "-o", out.to_str().unwrap()]);
    assert_eq!(code, 0, "audit failed: {stderr}");

    let content = std::fs::read_to_string(&out).expect("report written");
    assert!(content.contains("# COBOL Audit Report"));
    assert!(content.contains("## Recommendations"));
}

#[test]
fn csv_output_has_metric_sections() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);

    let (stdout, _, code) = run_audit(&file, &["-f", "csv"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("COBOL Audit Report"));
    assert!(stdout.contains("Structure,Total Lines"));
    assert!(stdout.contains("Quality,Complexity"));
}

#[test]
fn sonarqube_output_is_importable_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);

    let (stdout, _, code) = run_audit(&file, &["-f", "sonarqube"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["issues"][0]["engineId"], "cobol-audit");
    assert!(parsed["quality_gate"]["status"].is_string());
}

#[test]
fn log_level_flag_controls_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);

    // Default level is warn: a clean run emits no diagnostics.
    let (_, quiet_stderr, code) = run_audit(&file, &["-f", "json"]);
    assert_eq!(code, 0);
    assert!(!quiet_stderr.contains("rule finished"));

    let (stdout, stderr, code) = run_audit(&file, &["-f", "json", "--log-level", "debug"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("rule finished"), "debug diagnostics on stderr");
    // Diagnostics must not pollute the report stream.
    serde_json::from_str::<serde_json::Value>(&stdout).expect("valid JSON");
}

#[test]
fn log_level_env_var_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);

    let output = Command::new(cobaudit_bin())
        .args(["audit", file.to_str().unwrap(), "-f", "json"])
        .env("COBAUDIT_LOG", "debug")
        .env_remove("RUST_LOG")
        .output()
        .expect("run cobaudit");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rule finished"));
}

#[test]
fn missing_file_aborts_without_partial_report() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.cbl");

    let (stdout, stderr, code) = run_audit(&missing, &["-f", "json"]);
    assert_ne!(code, 0);
    assert!(stdout.trim().is_empty(), "no partial report on failure");
    assert!(stderr.contains("cannot read"));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(&dir);

    let (first, _, _) = run_audit(&file, &["-f", "csv"]);
    let (second, _, _) = run_audit(&file, &["-f", "csv"]);
    // Strip the Date: row, the only thing allowed to differ.
    let strip = |s: &str| {
        s.lines()
            .filter(|l| !l.starts_with("Date:"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&first), strip(&second));
}
