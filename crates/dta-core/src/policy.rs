//! Recommendation policy.
//!
//! Two hardcoded business rules, with no configuration surface:
//! - Below a test's threshold, the test is not worth ordering and no
//!   post-test math is run.
//! - Otherwise a test is informative exactly when a positive vs. negative
//!   result would move the probability by more than
//!   [`RECOMMENDATION_GAP_PERCENT`] percentage points.

use crate::catalog::TestProfile;
use schemars::JsonSchema;
use serde::Serialize;

/// Minimum post-test probability gap (percentage points) for a recommendation.
pub const RECOMMENDATION_GAP_PERCENT: f64 = 30.0;

/// Why a test was or was not recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Adjusted pre-test probability is below the test's threshold.
    BelowThreshold,
    /// Gap exceeds the recommendation cutoff.
    InformativeGap,
    /// Gap is at or below the cutoff.
    UninformativeGap,
    /// Gap could not be computed (pre-test probability of 100% or more).
    UndefinedGap,
}

impl DecisionReason {
    pub fn recommends(&self) -> bool {
        matches!(self, DecisionReason::InformativeGap)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            DecisionReason::BelowThreshold => "pre-test probability is below the test threshold",
            DecisionReason::InformativeGap => {
                "a positive vs. negative result would change the probability substantially"
            }
            DecisionReason::UninformativeGap => {
                "a positive vs. negative result would not change the probability enough"
            }
            DecisionReason::UndefinedGap => {
                "post-test probabilities are undefined at a pre-test probability of 100% or more"
            }
        }
    }
}

/// Threshold short-circuit: true when the test should not even be considered.
pub fn below_threshold(adjusted_percent: f64, test: &TestProfile) -> bool {
    adjusted_percent < test.threshold_percent
}

/// Classify a computed gap.
pub fn decide_on_gap(gap_percent: f64) -> DecisionReason {
    if gap_percent.is_nan() {
        DecisionReason::UndefinedGap
    } else if gap_percent > RECOMMENDATION_GAP_PERCENT {
        DecisionReason::InformativeGap
    } else {
        DecisionReason::UninformativeGap
    }
}
