//! Fixed catalog of dementia diagnostic tests.
//!
//! The four profiles are compiled in and never mutated. Lookup by exact name
//! is what the evaluator uses; [`find_test_fuzzy`] exists for the CLI, where
//! typing the full display name is impractical.

use schemars::JsonSchema;
use serde::Serialize;

/// Immutable diagnostic test profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct TestProfile {
    /// Display name, unique within the catalog.
    pub name: &'static str,
    /// Short CLI alias.
    pub alias: &'static str,
    /// Likelihood ratio of a positive result (LR+).
    pub positive_lr: f64,
    /// Likelihood ratio of a negative result (LR-).
    pub negative_lr: f64,
    /// Minimum adjusted pre-test probability (percent) worth testing at.
    pub threshold_percent: f64,
}

/// The built-in test catalog, in display order.
pub static CATALOG: [TestProfile; 4] = [
    TestProfile {
        name: "Neurofilament Light (NfL)",
        alias: "nfl",
        positive_lr: 2.5,
        negative_lr: 0.5,
        threshold_percent: 20.0,
    },
    TestProfile {
        name: "Glial Fibrillary Acidic Protein (GFAP)",
        alias: "gfap",
        positive_lr: 5.0,
        negative_lr: 0.1,
        threshold_percent: 15.0,
    },
    TestProfile {
        name: "Phosphorylated Tau 217 (pTau 217)",
        alias: "ptau217",
        positive_lr: 9.3,
        negative_lr: 0.46,
        threshold_percent: 10.0,
    },
    TestProfile {
        name: "Amyloid PET Scan",
        alias: "amyloid-pet",
        positive_lr: 12.0,
        negative_lr: 0.2,
        threshold_percent: 5.0,
    },
];

/// All catalog entries.
pub fn catalog() -> &'static [TestProfile] {
    &CATALOG
}

/// Exact-name lookup.
pub fn find_test(name: &str) -> Option<&'static TestProfile> {
    CATALOG.iter().find(|t| t.name == name)
}

/// Lenient lookup: exact name, then case-insensitive name or alias.
///
/// Whitespace around the query is ignored. Returns `None` for blank input.
pub fn find_test_fuzzy(query: &str) -> Option<&'static TestProfile> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(exact) = find_test(query) {
        return Some(exact);
    }
    CATALOG
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(query) || t.alias.eq_ignore_ascii_case(query))
}
