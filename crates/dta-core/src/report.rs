//! Payload envelopes and text rendering for assessment results.
//!
//! JSON payloads share an envelope (`schema_version`, `run_id`,
//! `generated_at`, `command`). Text renderings always round percentages to
//! one decimal place; the underlying values keep full precision.

use crate::evaluator::AssessmentResult;
use chrono::{DateTime, Utc};
use dta_common::error::StructuredError;
use dta_common::SCHEMA_VERSION;
use dta_math::likelihood_ratio::LrSummary;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt::Write as _;

/// Tag shown for a recommended test.
pub const RECOMMENDED_TAG: &str = "[RECOMMENDED]";
/// Tag shown for a test that is not recommended.
pub const NOT_RECOMMENDED_TAG: &str = "[NOT RECOMMENDED]";

/// Evidence annotation for both outcomes of the selected test.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TestEvidence {
    pub positive: LrSummary,
    pub negative: LrSummary,
}

impl TestEvidence {
    pub fn for_result(result: &AssessmentResult) -> Self {
        TestEvidence {
            positive: LrSummary::from_lr(result.selected_test.positive_lr),
            negative: LrSummary::from_lr(result.selected_test.negative_lr),
        }
    }
}

/// Common envelope fields.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Envelope {
    pub schema_version: String,
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
}

impl Envelope {
    pub fn new(run_id: &str, command: &str) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION.to_string(),
            run_id: run_id.to_string(),
            generated_at: Utc::now(),
            command: command.to_string(),
        }
    }
}

/// JSON payload of `dta assess`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AssessmentReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub result: AssessmentResult,
    pub evidence: TestEvidence,
}

impl AssessmentReport {
    pub fn new(envelope: Envelope, result: AssessmentResult) -> Self {
        let evidence = TestEvidence::for_result(&result);
        AssessmentReport {
            envelope,
            result,
            evidence,
        }
    }
}

/// JSON payload of `dta compare`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ComparisonReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub results: Vec<AssessmentResult>,
    /// Names of the recommended tests, in catalog order.
    pub recommended: Vec<String>,
}

impl ComparisonReport {
    pub fn new(envelope: Envelope, results: Vec<AssessmentResult>) -> Self {
        let recommended = results
            .iter()
            .filter(|r| r.recommended)
            .map(|r| r.selected_test.name.to_string())
            .collect();
        ComparisonReport {
            envelope,
            results,
            recommended,
        }
    }
}

/// JSON payload for any failed command.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub error: StructuredError,
}

/// Format a percentage with one decimal place. Non-finite values are "undefined".
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "undefined".to_string()
    }
}

/// `[RECOMMENDED]` or `[NOT RECOMMENDED]`.
pub fn verdict_tag(result: &AssessmentResult) -> &'static str {
    if result.recommended {
        RECOMMENDED_TAG
    } else {
        NOT_RECOMMENDED_TAG
    }
}

/// One-line summary.
pub fn render_summary(result: &AssessmentResult) -> String {
    let mut line = format!(
        "{} {}: pre-test {}",
        verdict_tag(result),
        result.selected_test.name,
        format_percent(result.adjusted_pre_test_probability_percent)
    );
    match result.post_test {
        Some(post) => {
            let _ = write!(
                line,
                ", positive {} / negative {} (gap {})",
                format_percent(post.if_positive_percent),
                format_percent(post.if_negative_percent),
                format_gap(post.gap_percent)
            );
        }
        None => {
            let _ = write!(
                line,
                ", below {} threshold",
                format_percent(result.selected_test.threshold_percent)
            );
        }
    }
    line
}

/// Plain-language narrative, as shown to a clinician.
pub fn render_prose(result: &AssessmentResult) -> String {
    let test = &result.selected_test;
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", verdict_tag(result), test.name);
    let _ = writeln!(
        out,
        "For a patient aged {}, the age-based baseline risk is {}. Your estimate was {}, so the adjusted pre-test probability is {}.",
        result.patient_age,
        format_percent(result.baseline_risk_percent),
        format_percent(result.clinician_probability_percent),
        format_percent(result.adjusted_pre_test_probability_percent),
    );
    match result.post_test {
        None => {
            let _ = writeln!(
                out,
                "This is below the {} threshold for {}, so the test is not likely to be useful.",
                format_percent(test.threshold_percent),
                test.name
            );
        }
        Some(post) => {
            let _ = writeln!(
                out,
                "A positive result would raise the probability to {}; a negative result would lower it to {}.",
                format_percent(post.if_positive_percent),
                format_percent(post.if_negative_percent),
            );
            let _ = writeln!(
                out,
                "The difference of {} percentage points means {}.",
                format_gap(post.gap_percent),
                result.reason.describe()
            );
        }
    }
    for note in &result.notes {
        let _ = writeln!(out, "Note: {}.", note.describe());
    }
    out
}

/// Markdown rendering with a figures table.
pub fn render_md(result: &AssessmentResult) -> String {
    let test = &result.selected_test;
    let evidence = TestEvidence::for_result(result);
    let mut out = String::new();
    let _ = writeln!(out, "## {} {}", verdict_tag(result), test.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "| Figure | Value |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(out, "| Patient age | {} |", result.patient_age);
    let _ = writeln!(
        out,
        "| Clinician estimate | {} |",
        format_percent(result.clinician_probability_percent)
    );
    let _ = writeln!(
        out,
        "| Baseline risk | {} |",
        format_percent(result.baseline_risk_percent)
    );
    let _ = writeln!(
        out,
        "| Adjusted pre-test probability | {} |",
        format_percent(result.adjusted_pre_test_probability_percent)
    );
    let _ = writeln!(
        out,
        "| Test threshold | {} |",
        format_percent(test.threshold_percent)
    );
    if let Some(post) = result.post_test {
        let _ = writeln!(
            out,
            "| Post-test if positive (LR+ {}, {}) | {} |",
            test.positive_lr,
            evidence.positive.strength,
            format_percent(post.if_positive_percent)
        );
        let _ = writeln!(
            out,
            "| Post-test if negative (LR- {}, {}) | {} |",
            test.negative_lr,
            evidence.negative.strength,
            format_percent(post.if_negative_percent)
        );
        let _ = writeln!(
            out,
            "| Probability gap | {} points |",
            format_gap(post.gap_percent)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Decision: {}.", result.reason.describe());
    for note in &result.notes {
        let _ = writeln!(out, "- Note: {}", note.describe());
    }
    out
}

fn format_gap(gap: f64) -> String {
    if gap.is_finite() {
        format!("{:.1}", gap)
    } else {
        "undefined".to_string()
    }
}
