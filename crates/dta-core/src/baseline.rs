//! Age-banded baseline dementia risk.
//!
//! A deliberate simplification, not a validated clinical model. Upper bounds
//! are inclusive; anything past the last bounded band (including ages that
//! no earlier band matched) gets the open-ended final rate.

use schemars::JsonSchema;
use serde::Serialize;

/// One row of the baseline table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct AgeBand {
    /// Inclusive upper bound, `None` for the open-ended final band.
    pub max_age: Option<i64>,
    pub baseline_percent: f64,
}

/// Baseline bands in ascending age order.
pub static AGE_BANDS: [AgeBand; 7] = [
    AgeBand::up_to(59, 3.0),
    AgeBand::up_to(65, 10.0),
    AgeBand::up_to(70, 15.0),
    AgeBand::up_to(75, 25.0),
    AgeBand::up_to(80, 35.0),
    AgeBand::up_to(85, 50.0),
    AgeBand::open_ended(65.0),
];

/// The band an age falls into. Negative ages land in the first band.
pub fn age_band(age: i64) -> &'static AgeBand {
    AGE_BANDS
        .iter()
        .find(|band| band.max_age.is_none_or(|max| age <= max))
        .unwrap_or(&AGE_BANDS[AGE_BANDS.len() - 1])
}

/// Baseline risk (percent) for a patient age.
pub fn baseline_risk(age: i64) -> f64 {
    age_band(age).baseline_percent
}

impl AgeBand {
    const fn up_to(max_age: i64, baseline_percent: f64) -> Self {
        AgeBand {
            max_age: Some(max_age),
            baseline_percent,
        }
    }

    const fn open_ended(baseline_percent: f64) -> Self {
        AgeBand {
            max_age: None,
            baseline_percent,
        }
    }

    /// Human label such as `"66-70"`, `"<60"` or `">85"`.
    pub fn label(&self) -> String {
        let idx = AGE_BANDS
            .iter()
            .position(|b| b == self)
            .unwrap_or(AGE_BANDS.len() - 1);
        match (idx, self.max_age) {
            (0, Some(max)) => format!("<{}", max + 1),
            (_, None) => {
                let prev = AGE_BANDS[idx - 1].max_age.unwrap_or_default();
                format!(">{}", prev)
            }
            (_, Some(max)) => {
                let lo = AGE_BANDS[idx - 1].max_age.unwrap_or_default() + 1;
                format!("{}-{}", lo, max)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(baseline_risk(59), 3.0);
        assert_eq!(baseline_risk(60), 10.0);
        assert_eq!(baseline_risk(65), 10.0);
        assert_eq!(baseline_risk(66), 15.0);
        assert_eq!(baseline_risk(70), 15.0);
        assert_eq!(baseline_risk(71), 25.0);
        assert_eq!(baseline_risk(75), 25.0);
        assert_eq!(baseline_risk(76), 35.0);
        assert_eq!(baseline_risk(80), 35.0);
        assert_eq!(baseline_risk(81), 50.0);
        assert_eq!(baseline_risk(85), 50.0);
        assert_eq!(baseline_risk(86), 65.0);
    }

    #[test]
    fn out_of_range_ages_fall_through() {
        assert_eq!(baseline_risk(-5), 3.0);
        assert_eq!(baseline_risk(0), 3.0);
        assert_eq!(baseline_risk(130), 65.0);
        assert_eq!(baseline_risk(i64::MAX), 65.0);
        assert_eq!(baseline_risk(i64::MIN), 3.0);
    }

    #[test]
    fn monotone_across_all_boundaries() {
        let mut prev = baseline_risk(-1);
        for age in 0..=120 {
            let current = baseline_risk(age);
            assert!(current >= prev, "age {age}: {current} < {prev}");
            prev = current;
        }
    }

    #[test]
    fn labels() {
        assert_eq!(age_band(40).label(), "<60");
        assert_eq!(age_band(60).label(), "60-65");
        assert_eq!(age_band(70).label(), "66-70");
        assert_eq!(age_band(85).label(), "81-85");
        assert_eq!(age_band(99).label(), ">85");
    }
}
