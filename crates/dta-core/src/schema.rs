//! JSON Schema generation for CLI output types.
//!
//! ```bash
//! dta schema --list
//! dta schema AssessmentReport
//! ```

use schemars::schema_for;
use serde_json::Value;

pub use crate::baseline::AgeBand;
pub use crate::catalog::TestProfile;
pub use crate::evaluator::{AssessmentNote, AssessmentResult, PostTestProbabilities};
pub use crate::policy::DecisionReason;
pub use crate::report::{AssessmentReport, ComparisonReport, ErrorReport, TestEvidence};
pub use dta_common::error::StructuredError;
pub use dta_math::likelihood_ratio::LrSummary;

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("AssessmentReport", "Payload of 'dta assess'"),
        ("ComparisonReport", "Payload of 'dta compare'"),
        ("ErrorReport", "Payload emitted when a command fails"),
        ("AssessmentResult", "Outcome of a single evaluation"),
        ("PostTestProbabilities", "Post-test probabilities and their gap"),
        ("AssessmentNote", "Advisory observation attached to a result"),
        ("DecisionReason", "Why a test was or was not recommended"),
        ("TestProfile", "Catalog entry for a diagnostic test"),
        ("TestEvidence", "Likelihood-ratio evidence for both outcomes"),
        ("LrSummary", "Evidence summary for a single likelihood ratio"),
        ("AgeBand", "Row of the baseline risk table"),
        ("StructuredError", "Machine-readable error"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns None if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "AssessmentReport" => schema_for!(AssessmentReport),
        "ComparisonReport" => schema_for!(ComparisonReport),
        "ErrorReport" => schema_for!(ErrorReport),
        "AssessmentResult" => schema_for!(AssessmentResult),
        "PostTestProbabilities" => schema_for!(PostTestProbabilities),
        "AssessmentNote" => schema_for!(AssessmentNote),
        "DecisionReason" => schema_for!(DecisionReason),
        "TestProfile" => schema_for!(TestProfile),
        "TestEvidence" => schema_for!(TestEvidence),
        "LrSummary" => schema_for!(LrSummary),
        "AgeBand" => schema_for!(AgeBand),
        "StructuredError" => schema_for!(StructuredError),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}
