//! Fuzz target for assessment evaluation.
//!
//! Feeds arbitrary text into all three input fields and checks that
//! evaluation either returns one of the documented errors or a result whose
//! invariants hold, and that the result always serializes.

#![no_main]

use arbitrary::Arbitrary;
use dta_common::error::StructuredError;
use dta_core::evaluator::{evaluate, AssessmentInput};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct RawInput {
    probability: String,
    age: String,
    test: String,
    pick_catalog_test: Option<u8>,
}

fuzz_target!(|raw: RawInput| {
    let test = match raw.pick_catalog_test {
        Some(i) => {
            let tests = dta_core::catalog();
            tests[i as usize % tests.len()].name.to_string()
        }
        None => raw.test,
    };
    let input = AssessmentInput::new(raw.probability, raw.age, test);

    match evaluate(&input) {
        Ok(result) => {
            assert!(result.adjusted_pre_test_probability_percent >= result.baseline_risk_percent);
            if result.recommended {
                assert!(result.post_test.is_some());
            }
            let _ = serde_json::to_string(&result).expect("result serializes");
        }
        Err(err) => {
            let structured = StructuredError::from(&err);
            assert!((10..30).contains(&structured.code));
        }
    }
});
