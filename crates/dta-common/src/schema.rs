//! Payload schema versioning.

/// Version of the JSON payloads emitted by `dta`.
///
/// Bumped whenever a field is removed or changes meaning.
pub const SCHEMA_VERSION: &str = "1.0.0";
