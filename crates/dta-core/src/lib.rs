//! Dementia Test Advisor Core Library
//!
//! This library provides the risk evaluator behind the `dta` CLI:
//! - The fixed diagnostic test catalog
//! - Age-banded baseline risk
//! - Likelihood-ratio evaluation and the recommendation policy
//! - Report rendering, JSON schemas, and exit codes
//! - Structured logging setup
//!
//! The binary entry point is in `main.rs`.

pub mod baseline;
pub mod catalog;
pub mod evaluator;
pub mod exit_codes;
pub mod logging;
pub mod policy;
pub mod report;
pub mod schema;

pub use catalog::{catalog, find_test, TestProfile};
pub use evaluator::{evaluate, evaluate_all, AssessmentInput, AssessmentResult};
pub use dta_common::error::AssessmentError;
