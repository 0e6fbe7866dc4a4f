//! Likelihood-ratio evidence utilities for test explainability.
//!
//! A likelihood ratio LR = P(result | disease) / P(result | no disease)
//! multiplies pre-test odds. This module summarizes how far a single LR
//! can move a diagnosis:
//! - Evidence in bits (`log2 LR`)
//! - Strength bands (Jaeschke et al. rule of thumb)
//! - Direction (rules in vs. rules out)
//!
//! Labels are for presentation only; the raw LR is always preserved.

use schemars::JsonSchema;
use serde::Serialize;

/// Evidence carried by a likelihood ratio, in bits.
///
/// Positive values favor disease, negative values favor its absence.
/// Returns `-inf` for LR = 0 and NaN for negative or NaN input.
pub fn evidence_bits(likelihood_ratio: f64) -> f64 {
    if likelihood_ratio.is_nan() || likelihood_ratio < 0.0 {
        return f64::NAN;
    }
    likelihood_ratio.log2()
}

/// How much a likelihood ratio shifts pre-test odds.
///
/// Bands are symmetric on the log scale:
///
/// | LR >= 1 | LR < 1 | strength |
/// |---|---|---|
/// | > 10 | < 0.1 | large |
/// | 5-10 | 0.1-0.2 | moderate |
/// | 2-5 | 0.2-0.5 | small |
/// | 1-2 | 0.5-1 | minimal |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LrStrength {
    Minimal,
    Small,
    Moderate,
    Large,
}

impl LrStrength {
    /// Classify a likelihood ratio. NaN and negative values are `Minimal`.
    pub fn from_lr(lr: f64) -> Self {
        if lr.is_nan() || lr < 0.0 {
            return LrStrength::Minimal;
        }
        if lr >= 1.0 {
            if lr > 10.0 {
                LrStrength::Large
            } else if lr >= 5.0 {
                LrStrength::Moderate
            } else if lr >= 2.0 {
                LrStrength::Small
            } else {
                LrStrength::Minimal
            }
        } else if lr < 0.1 {
            LrStrength::Large
        } else if lr <= 0.2 {
            LrStrength::Moderate
        } else if lr <= 0.5 {
            LrStrength::Small
        } else {
            LrStrength::Minimal
        }
    }

    /// Return a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LrStrength::Minimal => "minimal",
            LrStrength::Small => "small",
            LrStrength::Moderate => "moderate",
            LrStrength::Large => "large",
        }
    }
}

impl std::fmt::Display for LrStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which way a result pushes the diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LrDirection {
    /// LR > 1: result raises the probability of disease.
    RulesIn,
    /// LR < 1: result lowers it.
    RulesOut,
    /// LR = 1 (or NaN): no information.
    Neutral,
}

impl LrDirection {
    pub fn from_lr(lr: f64) -> Self {
        if lr.is_nan() || (lr - 1.0).abs() < f64::EPSILON {
            LrDirection::Neutral
        } else if lr > 1.0 {
            LrDirection::RulesIn
        } else {
            LrDirection::RulesOut
        }
    }
}

/// Complete evidence summary for a single likelihood ratio.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct LrSummary {
    /// The raw likelihood ratio.
    pub likelihood_ratio: f64,
    /// Evidence in bits (`log2 LR`).
    pub bits: f64,
    pub strength: LrStrength,
    pub direction: LrDirection,
}

impl LrSummary {
    pub fn from_lr(lr: f64) -> Self {
        LrSummary {
            likelihood_ratio: lr,
            bits: evidence_bits(lr),
            strength: LrStrength::from_lr(lr),
            direction: LrDirection::from_lr(lr),
        }
    }
}
