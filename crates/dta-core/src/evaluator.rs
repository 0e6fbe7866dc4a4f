//! Risk evaluator: input validation, age adjustment, Bayesian update, decision.
//!
//! [`evaluate`] is the single entry point for raw user input. It runs, in
//! order: numeric parsing, test selection check, catalog lookup, baseline
//! lookup, age adjustment, threshold short-circuit, post-test update, and the
//! gap decision. Everything after the lookup is [`assess`], which operates on
//! already-typed values.
//!
//! Evaluation is pure; calling it twice with the same input yields the same
//! result.

use crate::baseline::baseline_risk;
use crate::catalog::{catalog, find_test, TestProfile};
use crate::logging::event_names;
use crate::policy::{below_threshold, decide_on_gap, DecisionReason};
use dta_common::error::{AssessmentError, NumericField};
use dta_math::post_test_probability;
use schemars::JsonSchema;
use serde::Serialize;

/// Raw assessment input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentInput {
    /// Clinician's pre-test probability estimate, in percent.
    pub clinician_probability: String,
    /// Patient age in years.
    pub patient_age: String,
    /// Exact catalog name of the selected test (empty when unselected).
    pub selected_test: String,
}

impl AssessmentInput {
    pub fn new(
        clinician_probability: impl Into<String>,
        patient_age: impl Into<String>,
        selected_test: impl Into<String>,
    ) -> Self {
        AssessmentInput {
            clinician_probability: clinician_probability.into(),
            patient_age: patient_age.into(),
            selected_test: selected_test.into(),
        }
    }
}

/// Post-test probabilities for both outcomes, in percent (full precision).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct PostTestProbabilities {
    pub if_positive_percent: f64,
    pub if_negative_percent: f64,
    /// `|if_positive_percent - if_negative_percent|`.
    pub gap_percent: f64,
}

/// Advisory observations about an assessment. Notes never change the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentNote {
    /// Age below zero was accepted and placed in the youngest band.
    NegativeAge,
    /// Clinician probability outside 0-100%.
    ProbabilityOutOfRange,
    /// Age-adjusted baseline exceeded the clinician estimate and replaced it.
    BaselineOverride,
    /// Adjusted pre-test probability of 100% or more; odds are undefined.
    CertainPreTest,
}

impl AssessmentNote {
    pub fn describe(&self) -> &'static str {
        match self {
            AssessmentNote::NegativeAge => "negative age accepted and treated as under 60",
            AssessmentNote::ProbabilityOutOfRange => {
                "clinician probability is outside the 0-100% range"
            }
            AssessmentNote::BaselineOverride => {
                "age-based baseline risk exceeds the clinician estimate and was used instead"
            }
            AssessmentNote::CertainPreTest => {
                "pre-test probability of 100% or more leaves post-test probabilities undefined"
            }
        }
    }
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct AssessmentResult {
    pub recommended: bool,
    pub reason: DecisionReason,
    pub selected_test: TestProfile,
    pub clinician_probability_percent: f64,
    pub patient_age: i64,
    pub baseline_risk_percent: f64,
    /// `max(clinician_probability_percent, baseline_risk_percent)`.
    pub adjusted_pre_test_probability_percent: f64,
    /// Absent when the threshold short-circuit fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_test: Option<PostTestProbabilities>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<AssessmentNote>,
}

impl AssessmentResult {
    pub fn post_test_probability_if_positive_percent(&self) -> Option<f64> {
        self.post_test.map(|p| p.if_positive_percent)
    }

    pub fn post_test_probability_if_negative_percent(&self) -> Option<f64> {
        self.post_test.map(|p| p.if_negative_percent)
    }

    pub fn probability_gap_percent(&self) -> Option<f64> {
        self.post_test.map(|p| p.gap_percent)
    }
}

/// Parse a percentage field. Surrounding whitespace is ignored.
pub fn parse_percent(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an age field, truncating any fractional part toward zero.
///
/// Out-of-range magnitudes saturate to `i64::MIN`/`i64::MAX`.
pub fn parse_age(text: &str) -> Option<i64> {
    parse_percent(text).map(|v| v.trunc() as i64)
}

fn parse_numeric(probability: &str, age: &str) -> Result<(f64, i64), AssessmentError> {
    let probability = parse_percent(probability).ok_or(AssessmentError::InvalidNumericInput {
        field: NumericField::ClinicianProbability,
    })?;
    let age = parse_age(age).ok_or(AssessmentError::InvalidNumericInput {
        field: NumericField::PatientAge,
    })?;
    Ok((probability, age))
}

/// Evaluate raw input against the catalog.
pub fn evaluate(input: &AssessmentInput) -> Result<AssessmentResult, AssessmentError> {
    tracing::trace!(
        target: event_names::EVALUATE_STARTED,
        test = %input.selected_test,
        "evaluating assessment"
    );

    let outcome = evaluate_inner(input);
    if let Err(err) = &outcome {
        tracing::debug!(
            target: event_names::EVALUATE_REJECTED,
            code = err.code(),
            "{}",
            err
        );
    }
    outcome
}

fn evaluate_inner(input: &AssessmentInput) -> Result<AssessmentResult, AssessmentError> {
    let (probability, age) = parse_numeric(&input.clinician_probability, &input.patient_age)?;

    let name = input.selected_test.as_str();
    if name.trim().is_empty() {
        return Err(AssessmentError::NoTestSelected);
    }
    let test = find_test(name).ok_or_else(|| AssessmentError::TestNotFound {
        name: name.to_string(),
    })?;

    Ok(assess(probability, age, test))
}

/// Evaluate every catalog test for the same patient, in catalog order.
pub fn evaluate_all(
    clinician_probability: &str,
    patient_age: &str,
) -> Result<Vec<AssessmentResult>, AssessmentError> {
    let (probability, age) = parse_numeric(clinician_probability, patient_age)?;
    Ok(catalog()
        .iter()
        .map(|test| assess(probability, age, test))
        .collect())
}

/// Steps 4-9 of the evaluation on typed values.
pub fn assess(clinician_probability: f64, age: i64, test: &TestProfile) -> AssessmentResult {
    let baseline = baseline_risk(age);
    let adjusted = clinician_probability.max(baseline);

    let mut notes = Vec::new();
    if age < 0 {
        notes.push(AssessmentNote::NegativeAge);
    }
    if !(0.0..=100.0).contains(&clinician_probability) {
        notes.push(AssessmentNote::ProbabilityOutOfRange);
    }
    if baseline > clinician_probability {
        notes.push(AssessmentNote::BaselineOverride);
    }
    if adjusted >= 100.0 {
        notes.push(AssessmentNote::CertainPreTest);
    }

    if below_threshold(adjusted, test) {
        tracing::debug!(
            target: event_names::EVALUATE_SHORT_CIRCUIT,
            test = test.name,
            adjusted,
            threshold = test.threshold_percent,
            "below test threshold"
        );
        return AssessmentResult {
            recommended: false,
            reason: DecisionReason::BelowThreshold,
            selected_test: *test,
            clinician_probability_percent: clinician_probability,
            patient_age: age,
            baseline_risk_percent: baseline,
            adjusted_pre_test_probability_percent: adjusted,
            post_test: None,
            notes,
        };
    }

    // At or past certainty the odds are undefined (or negative), so the
    // update is not attempted and the gap stays NaN.
    let (if_positive, if_negative) = if adjusted >= 100.0 {
        (f64::NAN, f64::NAN)
    } else {
        let pre_test = adjusted / 100.0;
        (
            post_test_probability(pre_test, test.positive_lr) * 100.0,
            post_test_probability(pre_test, test.negative_lr) * 100.0,
        )
    };
    let gap = (if_positive - if_negative).abs();
    let reason = decide_on_gap(gap);

    tracing::debug!(
        target: event_names::EVALUATE_COMPLETED,
        test = test.name,
        adjusted,
        if_positive,
        if_negative,
        gap,
        recommended = reason.recommends(),
        "assessment complete"
    );

    AssessmentResult {
        recommended: reason.recommends(),
        reason,
        selected_test: *test,
        clinician_probability_percent: clinician_probability,
        patient_age: age,
        baseline_risk_percent: baseline,
        adjusted_pre_test_probability_percent: adjusted,
        post_test: Some(PostTestProbabilities {
            if_positive_percent: if_positive,
            if_negative_percent: if_negative,
            gap_percent: gap,
        }),
        notes,
    }
}
