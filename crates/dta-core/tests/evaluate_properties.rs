//! Property-based tests for the risk evaluator.

use dta_core::baseline::baseline_risk;
use dta_core::catalog::catalog;
use dta_core::evaluator::{evaluate, AssessmentInput};
use dta_core::policy::{DecisionReason, RECOMMENDATION_GAP_PERCENT};
use dta_core::AssessmentError;
use proptest::prelude::*;

fn test_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(catalog().iter().map(|t| t.name).collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Baseline risk never decreases with age.
    #[test]
    fn baseline_monotone_in_age(a in -10i64..130, b in -10i64..130) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(baseline_risk(lo) <= baseline_risk(hi));
    }

    /// The adjusted pre-test probability dominates both of its inputs.
    #[test]
    fn adjusted_dominates_inputs(p in 0.0..99.9f64, age in 0i64..110, name in test_name()) {
        let input = AssessmentInput::new(p.to_string(), age.to_string(), name);
        let r = evaluate(&input).unwrap();
        prop_assert!(r.adjusted_pre_test_probability_percent >= r.clinician_probability_percent);
        prop_assert!(r.adjusted_pre_test_probability_percent >= r.baseline_risk_percent);
    }

    /// Post-test math is skipped exactly when the adjusted probability is below threshold.
    #[test]
    fn short_circuit_iff_below_threshold(p in 0.0..99.9f64, age in 0i64..110, name in test_name()) {
        let r = evaluate(&AssessmentInput::new(p.to_string(), age.to_string(), name)).unwrap();
        let below = r.adjusted_pre_test_probability_percent < r.selected_test.threshold_percent;
        prop_assert_eq!(r.post_test.is_none(), below);
        if below {
            prop_assert_eq!(r.reason, DecisionReason::BelowThreshold);
            prop_assert!(!r.recommended);
        }
    }

    /// When computed, the positive outcome sits above the negative one and the
    /// decision follows the gap cutoff.
    #[test]
    fn recommendation_follows_gap(p in 0.0..99.9f64, age in 0i64..110, name in test_name()) {
        let r = evaluate(&AssessmentInput::new(p.to_string(), age.to_string(), name)).unwrap();
        if let Some(post) = r.post_test {
            prop_assert!(post.if_positive_percent >= post.if_negative_percent);
            prop_assert_eq!(r.recommended, post.gap_percent > RECOMMENDATION_GAP_PERCENT);
        }
    }

    /// Probabilities at or past certainty never produce a recommendation
    /// and never produce finite post-test figures.
    #[test]
    fn certain_or_higher_is_never_recommended(p in 100.0..1000.0f64, age in -20i64..130, name in test_name()) {
        let r = evaluate(&AssessmentInput::new(p.to_string(), age.to_string(), name)).unwrap();
        prop_assert!(!r.recommended);
        prop_assert_eq!(r.reason, DecisionReason::UndefinedGap);
        let post = r.post_test.unwrap();
        prop_assert!(post.gap_percent.is_nan());
        prop_assert!(post.if_positive_percent.is_nan() && post.if_negative_percent.is_nan());
    }

    /// Evaluation is a pure function of its input. Certain pre-test values
    /// produce NaN, which never compares equal, so they are left out.
    #[test]
    fn evaluation_is_idempotent(p in -50.0..99.9f64, age in -20i64..130, name in test_name()) {
        let input = AssessmentInput::new(p.to_string(), age.to_string(), name);
        prop_assert_eq!(evaluate(&input), evaluate(&input));
    }

    /// Unparseable numbers are reported before any test-selection problem.
    #[test]
    fn invalid_numbers_win(junk in "[a-z]{1,8}", test in "[A-Za-z ]{0,12}") {
        let input = AssessmentInput::new(junk, "70", test);
        prop_assert!(
            matches!(
                evaluate(&input),
                Err(AssessmentError::InvalidNumericInput { .. })
            ),
            "numeric error should take precedence"
        );
    }
}
