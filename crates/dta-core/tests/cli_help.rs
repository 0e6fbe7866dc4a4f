//! CLI help output tests for dta.
//!
//! These tests verify that all commands correctly display their help text
//! without errors.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the dta binary.
fn dta() -> Command {
    cargo_bin_cmd!("dta")
}

mod top_level {
    use super::*;

    #[test]
    fn help_flag_works() {
        dta()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dementia Test Advisor"));
    }

    #[test]
    fn version_flag_works() {
        dta()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dta"));
    }

    #[test]
    fn help_shows_all_commands() {
        dta()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("assess"))
            .stdout(predicate::str::contains("compare"))
            .stdout(predicate::str::contains("tests"))
            .stdout(predicate::str::contains("baseline"))
            .stdout(predicate::str::contains("schema"));
    }

    #[test]
    fn help_shows_global_options() {
        dta()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--format"))
            .stdout(predicate::str::contains("--verbose"))
            .stdout(predicate::str::contains("--quiet"));
    }

    #[test]
    fn missing_subcommand_fails() {
        dta().assert().failure();
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn assess_help_lists_inputs() {
        dta()
            .args(["assess", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--probability"))
            .stdout(predicate::str::contains("--age"))
            .stdout(predicate::str::contains("--test"));
    }

    #[test]
    fn compare_help_works() {
        dta()
            .args(["compare", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("every catalog test"));
    }

    #[test]
    fn schema_help_works() {
        dta()
            .args(["schema", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--list"));
    }
}
