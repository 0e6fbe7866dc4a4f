//! Probability/odds conversions and likelihood-ratio updating.
//!
//! All probabilities here are decimals in [0, 1]. Percent handling lives in
//! `dta-core`.

/// Convert a probability to odds: `p / (1 - p)`.
///
/// Returns `+inf` at `p = 1` and NaN for NaN input. No clamping is applied.
pub fn probability_to_odds(p: f64) -> f64 {
    p / (1.0 - p)
}

/// Convert odds back to a probability: `odds / (1 + odds)`.
///
/// `+inf` odds yield NaN (inf / inf), matching the unguarded formula.
pub fn odds_to_probability(odds: f64) -> f64 {
    odds / (1.0 + odds)
}

/// Natural log of the odds, `ln(p) - ln(1 - p)`.
///
/// Returns `-inf` at 0, `+inf` at 1 and NaN outside [0, 1].
pub fn log_odds(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    p.ln() - (-p).ln_1p()
}

/// Numerically stable logistic function, the inverse of [`log_odds`].
pub fn logistic(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Bayesian update of a pre-test probability by a likelihood ratio.
///
/// Converts `pre_test` to odds, multiplies by `likelihood_ratio`, and
/// converts back. The odds transform is undefined at `pre_test = 1`; the
/// result there is NaN and callers must guard against it.
pub fn post_test_probability(pre_test: f64, likelihood_ratio: f64) -> f64 {
    let pre_odds = probability_to_odds(pre_test);
    let post_odds = pre_odds * likelihood_ratio;
    odds_to_probability(post_odds)
}

/// Log-odds formulation of [`post_test_probability`].
///
/// Agrees with the direct formula inside (0, 1) and stays finite for
/// extreme pre-test probabilities and likelihood ratios, saturating to
/// 0 or 1 instead of producing NaN at the boundaries. Returns NaN when the
/// boundary and the likelihood ratio contradict each other
/// (`pre_test = 1` with `LR = 0`, or `pre_test = 0` with `LR = inf`).
pub fn post_test_probability_log(pre_test: f64, likelihood_ratio: f64) -> f64 {
    if likelihood_ratio.is_nan() || likelihood_ratio < 0.0 {
        return f64::NAN;
    }
    let x = log_odds(pre_test) + likelihood_ratio.ln();
    logistic(x)
}
