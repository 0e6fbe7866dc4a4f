//! Dementia Test Advisor math utilities.

pub mod math;

pub use math::odds::*;
pub use math::likelihood_ratio;
