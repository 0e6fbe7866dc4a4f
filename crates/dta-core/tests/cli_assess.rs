//! End-to-end CLI tests for assessment commands.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn dta() -> Command {
    let mut cmd = cargo_bin_cmd!("dta");
    cmd.env_remove("DTA_FORMAT")
        .env_remove("DTA_LOG")
        .env_remove("DTA_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("dta should run");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// assess
// ============================================================================

#[test]
fn assess_recommended_exits_zero_with_report() {
    let json = json_stdout(dta().args([
        "assess",
        "--probability",
        "50",
        "--age",
        "70",
        "--test",
        "Phosphorylated Tau 217 (pTau 217)",
    ]));

    assert_eq!(json["command"], "assess");
    assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
    assert_eq!(json["result"]["recommended"], true);
    assert_eq!(json["result"]["baseline_risk_percent"], 15.0);
    assert_eq!(json["result"]["adjusted_pre_test_probability_percent"], 50.0);
    let gap = json["result"]["post_test"]["gap_percent"].as_f64().unwrap();
    assert!((gap - 58.78).abs() < 0.01);

    dta()
        .args(["assess", "-p", "50", "-a", "70", "-t", "ptau217"])
        .assert()
        .code(0);
}

#[test]
fn assess_short_circuit_exits_one() {
    dta()
        .args(["-f", "summary", "assess", "-p", "0", "-a", "40", "-t", "nfl"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[NOT RECOMMENDED]"))
        .stdout(predicate::str::contains("below 20.0% threshold"))
        .stdout(predicate::str::contains("positive").not());
}

#[test]
fn assess_prose_shows_rounded_figures() {
    dta()
        .args(["--format", "prose", "assess", "-p", "50", "-a", "70", "-t", "PTAU217"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[RECOMMENDED]"))
        .stdout(predicate::str::contains("90.3%"))
        .stdout(predicate::str::contains("31.5%"));
}

#[test]
fn assess_markdown_renders_table() {
    dta()
        .args(["-f", "md", "assess", "-p", "5", "-a", "50", "-t", "amyloid-pet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## [RECOMMENDED] Amyloid PET Scan"))
        .stdout(predicate::str::contains("| Baseline risk | 3.0% |"));
}

#[test]
fn assess_accepts_negative_age() {
    let json = json_stdout(dta().args(["assess", "-p", "30", "-a", "-4", "-t", "gfap"]));
    assert_eq!(json["result"]["patient_age"], -4);
    let notes = json["result"]["notes"].as_array().unwrap();
    assert!(notes.iter().any(|n| n == "negative_age"));
}

#[test]
fn assess_certain_probability_is_not_recommended() {
    let output = dta()
        .args(["assess", "-p", "100", "-a", "70", "-t", "ptau217"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["reason"], "undefined_gap");
    assert!(json["result"]["post_test"]["gap_percent"].is_null());
}

// ============================================================================
// assess errors
// ============================================================================

#[test]
fn missing_probability_is_invalid_numeric_input() {
    let output = dta().args(["assess", "-a", "70"]).output().unwrap();
    assert_eq!(output.status.code(), Some(10));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"]["code"], 10);
    assert_eq!(
        json["error"]["message"],
        "Please enter valid numbers for both fields."
    );
    assert_eq!(json["error"]["context"]["field"], "clinician_probability");
}

#[test]
fn missing_test_is_no_test_selected() {
    dta()
        .args(["-f", "summary", "--no-color", "assess", "-p", "40", "-a", "70"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains(
            "Please select a dementia test to proceed.",
        ));
}

#[test]
fn unknown_test_is_not_found() {
    let output = dta()
        .args(["assess", "-p", "40", "-a", "70", "-t", "MRI"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(10));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"]["code"], 20);
    assert_eq!(json["error"]["message"], "Error: Selected test not found.");
    assert_eq!(json["error"]["category"], "catalog");
}

#[test]
fn exitcode_format_prints_nothing() {
    dta()
        .args(["-f", "exitcode", "assess", "-p", "0", "-a", "40", "-t", "nfl"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// compare / tests / baseline / schema
// ============================================================================

#[test]
fn compare_evaluates_whole_catalog() {
    let json = json_stdout(dta().args(["compare", "-p", "0", "-a", "40"]));
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    // Adjusted 3% sits below every threshold, the lowest being 5%.
    assert!(results.iter().all(|r| r["reason"] == "below_threshold"));
    assert!(json["recommended"].as_array().unwrap().is_empty());
}

#[test]
fn compare_exit_code_reflects_any_recommendation() {
    dta().args(["compare", "-p", "50", "-a", "70"]).assert().code(0);
    dta().args(["compare", "-p", "0", "-a", "40"]).assert().code(1);
}

#[test]
fn tests_lists_catalog() {
    let json = json_stdout(dta().arg("tests"));
    let tests = json["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 4);
    assert_eq!(tests[3]["name"], "Amyloid PET Scan");
    assert_eq!(tests[3]["positive_lr"], 12.0);
}

#[test]
fn baseline_reports_band() {
    let json = json_stdout(dta().args(["baseline", "--age", "86"]));
    assert_eq!(json["band"], ">85");
    assert_eq!(json["baseline_risk_percent"], 65.0);
    assert_eq!(json["bands"].as_array().unwrap().len(), 7);
}

#[test]
fn baseline_rejects_text_age() {
    dta().args(["baseline", "--age", "old"]).assert().code(10);
}

#[test]
fn schema_list_and_lookup() {
    let list = json_stdout(dta().args(["schema", "--list"]));
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .any(|entry| entry["name"] == "AssessmentReport"));

    dta()
        .args(["schema", "AssessmentResult"])
        .assert()
        .success()
        .stdout(predicate::str::contains("adjusted_pre_test_probability_percent"));

    dta().args(["schema", "Plan"]).assert().code(10);
}

#[test]
fn version_json() {
    let json = json_stdout(dta().arg("version"));
    assert_eq!(json["dta_version"], env!("CARGO_PKG_VERSION"));
}
