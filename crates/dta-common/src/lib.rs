//! Dementia Test Advisor common types and errors.
//!
//! This crate provides foundational types shared across dta-core modules:
//! - Assessment error types with stable codes
//! - Output format specifications
//! - Payload schema versioning

pub mod error;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
