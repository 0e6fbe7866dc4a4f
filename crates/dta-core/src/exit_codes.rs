//! Exit codes for the dta CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes (recommendation verdict)
//! - 10-19: User errors (recoverable by fixing input)
//! - 20-29: Internal errors

/// Exit codes for dta operations.
///
/// These codes are a stable contract for automation. Changes require
/// a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: test recommended, or an informational command completed
    Clean = 0,

    /// Assessment completed but the test is not recommended
    NotRecommended = 1,

    /// Invalid arguments or assessment input
    ArgsError = 10,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error (e.g. stdout closed)
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates an operational outcome (codes 0-1).
    pub fn is_operational(self) -> bool {
        (self as i32) < 10
    }

    /// Check if this exit code is a user error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    /// Check if this exit code indicates any error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::NotRecommended => "OK_NOT_RECOMMENDED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Map a workspace error to its exit code.
    pub fn for_error(err: &dta_common::Error) -> Self {
        match err {
            dta_common::Error::Assessment(_) | dta_common::Error::UnknownSchema(_) => {
                ExitCode::ArgsError
            }
            dta_common::Error::Io(_) => ExitCode::IoError,
            dta_common::Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
