//! Core math modules.

pub mod odds;
pub mod likelihood_ratio;
