//! Error types for the Dementia Test Advisor.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! Assessment failures ([`AssessmentError`]) carry the exact user-facing
//! messages of the evaluator and are surfaced verbatim. [`Error`] wraps them
//! together with the I/O failures the CLI can hit while writing payloads.
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Numeric Input
//!   Reason: Please enter valid numbers for both fields.
//!   Fix: Pass the clinician probability as a percentage (e.g. 35) and the age in years.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 11,
//!   "category": "input",
//!   "message": "Please select a dementia test to proceed.",
//!   "recoverable": true
//! }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Dementia Test Advisor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or missing user input.
    Input,
    /// Test catalog lookups.
    Catalog,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Catalog => write!(f, "catalog"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Which numeric field failed to parse first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    ClinicianProbability,
    PatientAge,
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericField::ClinicianProbability => write!(f, "clinician_probability"),
            NumericField::PatientAge => write!(f, "patient_age"),
        }
    }
}

/// Recoverable, user-facing failures of a single assessment.
///
/// Display strings are part of the contract and must not change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Please enter valid numbers for both fields.")]
    InvalidNumericInput { field: NumericField },

    #[error("Please select a dementia test to proceed.")]
    NoTestSelected,

    #[error("Error: Selected test not found.")]
    TestNotFound { name: String },
}

/// Unified error type for the Dementia Test Advisor.
#[derive(Error, Debug)]
pub enum Error {
    // Input / catalog errors (10-29)
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("unknown schema type: {0}")]
    UnknownSchema(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssessmentError {
    /// Stable error code (10-19 input, 20-29 catalog).
    pub fn code(&self) -> u32 {
        match self {
            AssessmentError::InvalidNumericInput { .. } => 10,
            AssessmentError::NoTestSelected => 11,
            AssessmentError::TestNotFound { .. } => 20,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AssessmentError::InvalidNumericInput { .. } | AssessmentError::NoTestSelected => {
                ErrorCategory::Input
            }
            AssessmentError::TestNotFound { .. } => ErrorCategory::Catalog,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            AssessmentError::InvalidNumericInput { .. } => "Invalid Numeric Input",
            AssessmentError::NoTestSelected => "No Test Selected",
            AssessmentError::TestNotFound { .. } => "Test Not Found",
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            AssessmentError::InvalidNumericInput { .. } => {
                "Pass the clinician probability as a percentage (e.g. 35) and the age in years."
            }
            AssessmentError::NoTestSelected => {
                "Choose one of the tests listed by 'dta tests' and pass it with '--test'."
            }
            AssessmentError::TestNotFound { .. } => {
                "Use an exact test name or alias from 'dta tests'."
            }
        }
    }
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Catalog errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Assessment(e) => e.code(),
            Error::UnknownSchema(_) => 12,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Assessment(e) => e.category(),
            Error::UnknownSchema(_) => ErrorCategory::Input,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Assessment errors: fix the input and retry
            Error::Assessment(_) => true,
            Error::UnknownSchema(_) => true,

            // Broken pipe or full disk; nothing to retry with
            Error::Io(_) => false,
            Error::Json(_) => false,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Assessment(e) => e.headline(),
            Error::UnknownSchema(_) => "Unknown Schema Type",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Assessment(e) => e.remediation(),
            Error::UnknownSchema(_) => "List available types with 'dta schema --list'.",
            Error::Io(_) => "Check that stdout is writable (e.g. not a closed pipe) and retry.",
            Error::Json(_) => "Internal serialization issue. Report as a bug with the command line used.",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., offending field).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Assessment(AssessmentError::InvalidNumericInput { field }) => {
                context.insert("field".to_string(), serde_json::json!(field));
            }
            Error::Assessment(AssessmentError::TestNotFound { name }) => {
                context.insert("test".to_string(), serde_json::json!(name));
            }
            Error::UnknownSchema(name) => {
                context.insert("type".to_string(), serde_json::json!(name));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl From<&AssessmentError> for StructuredError {
    fn from(err: &AssessmentError) -> Self {
        StructuredError::from(&Error::Assessment(err.clone()))
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
