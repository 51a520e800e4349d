//! Custom Assertion Helpers
//!
//! Small assertion helpers for guarded-operation outcomes and report
//! payloads, with failure messages that name what went wrong.

use core_kernel::Outcome;
use form_model::ReportData;

/// Asserts that a guarded operation actually ran its side effects
pub fn assert_applied(outcome: Outcome) {
    assert_eq!(
        outcome,
        Outcome::Applied,
        "expected the operation to apply, but it was skipped"
    );
}

/// Asserts that a guarded operation skipped because the case was missing
pub fn assert_skipped(outcome: Outcome) {
    assert_eq!(
        outcome,
        Outcome::SkippedMissingCase,
        "expected the operation to skip a missing case, but it applied"
    );
}

/// Asserts that a report carries exactly the given key/value pairs
pub fn assert_report_fields(report: &ReportData, expected: &[(&str, &str)]) {
    assert_eq!(
        report.len(),
        expected.len(),
        "report field count mismatch: got {:?}",
        report.iter().collect::<Vec<_>>()
    );
    for (name, value) in expected {
        assert_eq!(
            report.get(name),
            Some(*value),
            "report field {name:?} mismatch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_report_assertion_accepts_exact_match() {
        let mut map = HashMap::new();
        map.insert("someKey".to_string(), "someValue".to_string());
        let report = ReportData::from_map(map);
        assert_report_fields(&report, &[("someKey", "someValue")]);
    }

    #[test]
    #[should_panic(expected = "report field count mismatch")]
    fn test_report_assertion_rejects_extra_fields() {
        let mut map = HashMap::new();
        map.insert("someKey".to_string(), "someValue".to_string());
        map.insert("otherKey".to_string(), "otherValue".to_string());
        let report = ReportData::from_map(map);
        assert_report_fields(&report, &[("someKey", "someValue")]);
    }
}
