//! Verification report types.

use crate::record::CheckedField;

/// Information about a field mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    /// Identifier of the sampled record.
    pub id: String,
    pub field: CheckedField,
    /// Source value.
    pub source: Option<String>,
    /// Destination value.
    pub destination: Option<String>,
}

/// Verification report.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    /// Number of documents in the source collection.
    pub source_count: u64,
    /// Number of rows in the destination table.
    pub destination_count: u64,
    /// Number of source records sampled.
    pub sampled: u64,
    /// Number of sampled records found in the destination.
    pub found: u64,
    /// Field checks that matched.
    pub field_matches: u64,
    /// Details of fields that did not match.
    pub field_mismatches: Vec<FieldMismatch>,
    /// Identifiers of sampled records absent from the destination.
    pub missing_ids: Vec<String>,
}

impl VerificationReport {
    pub fn counts_match(&self) -> bool {
        self.source_count == self.destination_count
    }

    /// Check if verification passed.
    pub fn is_success(&self) -> bool {
        self.counts_match() && self.missing_ids.is_empty() && self.field_mismatches.is_empty()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!(
                "Verification PASSED: {} records on both sides, {}/{} sampled records matched",
                self.source_count, self.found, self.sampled
            )
        } else {
            format!(
                "Verification FAILED: source={}, destination={}, {} of {} sampled missing, {} field mismatches",
                self.source_count,
                self.destination_count,
                self.missing_ids.len(),
                self.sampled,
                self.field_mismatches.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_success() {
        let report = VerificationReport {
            source_count: 3,
            destination_count: 3,
            sampled: 3,
            found: 3,
            field_matches: 9,
            ..Default::default()
        };

        assert!(report.is_success());
        let summary = report.summary();
        assert!(summary.contains("PASSED"));
        assert!(summary.contains("3/3"));
    }

    #[test]
    fn test_report_failure_count() {
        let report = VerificationReport {
            source_count: 10,
            destination_count: 8,
            sampled: 5,
            found: 5,
            field_matches: 15,
            ..Default::default()
        };

        assert!(!report.is_success());
        let summary = report.summary();
        assert!(summary.contains("FAILED"));
        assert!(summary.contains("source=10"));
        assert!(summary.contains("destination=8"));
    }

    #[test]
    fn test_report_failure_missing() {
        let report = VerificationReport {
            source_count: 2,
            destination_count: 2,
            sampled: 2,
            found: 1,
            missing_ids: vec!["abc".to_string()],
            ..Default::default()
        };

        assert!(!report.is_success());
    }

    #[test]
    fn test_report_failure_mismatched() {
        let report = VerificationReport {
            source_count: 1,
            destination_count: 1,
            sampled: 1,
            found: 1,
            field_matches: 2,
            field_mismatches: vec![FieldMismatch {
                id: "abc".to_string(),
                field: CheckedField::Email,
                source: Some("a@example.com".to_string()),
                destination: None,
            }],
            ..Default::default()
        };

        assert!(!report.is_success());
        assert!(report.summary().contains("1 field mismatches"));
    }
}
