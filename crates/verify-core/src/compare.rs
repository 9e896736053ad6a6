//! Count and field comparison logic.

use crate::record::{CheckedField, DestinationRecord, SourceRecord};

/// Result of checking one field of one sampled record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareResult {
    /// Both sides hold the same value (including both absent).
    Match { value: Option<String> },
    /// The sides differ.
    Mismatch {
        source: Option<String>,
        destination: Option<String>,
    },
}

impl CompareResult {
    pub fn is_match(&self) -> bool {
        matches!(self, CompareResult::Match { .. })
    }
}

/// Outcome of checking one sampled record against the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No destination row carries the record's identifier; no field was checked.
    MissingCounterpart,
    /// One result per checked field, in check order.
    Compared(Vec<(CheckedField, CompareResult)>),
}

/// Outcome of comparing the two record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountComparison {
    Match(u64),
    Mismatch { source: u64, destination: u64 },
}

pub fn compare_counts(source: u64, destination: u64) -> CountComparison {
    if source == destination {
        CountComparison::Match(source)
    } else {
        CountComparison::Mismatch {
            source,
            destination,
        }
    }
}

/// Exact equality check of two optional values.
///
/// `None` only equals `None`: an absent source value never matches the string
/// `"null"` on the destination side, and the empty string is deliberately not
/// treated as null.
pub fn compare_values(source: Option<&str>, destination: Option<&str>) -> CompareResult {
    if source == destination {
        CompareResult::Match {
            value: source.map(str::to_string),
        }
    } else {
        CompareResult::Mismatch {
            source: source.map(str::to_string),
            destination: destination.map(str::to_string),
        }
    }
}

/// Compare one field of a record present on both sides.
pub fn compare_field(
    field: CheckedField,
    source: &SourceRecord,
    destination: &DestinationRecord,
) -> CompareResult {
    compare_values(field.source_value(source), field.destination_value(destination))
}

/// Compare all checked fields in their fixed order.
pub fn compare_record(
    source: &SourceRecord,
    destination: &DestinationRecord,
) -> Vec<(CheckedField, CompareResult)> {
    CheckedField::ALL
        .iter()
        .map(|field| (*field, compare_field(*field, source, destination)))
        .collect()
}

/// Check a sampled record against its destination lookup result.
pub fn check_record(
    source: &SourceRecord,
    destination: Option<&DestinationRecord>,
) -> RecordOutcome {
    match destination {
        Some(destination) => RecordOutcome::Compared(compare_record(source, destination)),
        None => RecordOutcome::MissingCounterpart,
    }
}

/// Render an optional value for diagnostic output.
pub fn display_value(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(email: Option<&str>, name: Option<&str>, group: Option<&str>) -> SourceRecord {
        SourceRecord {
            id: "64b7f0c2a1b2c3d4e5f60718".to_string(),
            email: email.map(String::from),
            name: name.map(String::from),
            group: group.map(String::from),
        }
    }

    fn destination(
        email: Option<&str>,
        name: Option<&str>,
        group_id: Option<&str>,
    ) -> DestinationRecord {
        DestinationRecord {
            id: "64b7f0c2a1b2c3d4e5f60718".to_string(),
            email: email.map(String::from),
            name: name.map(String::from),
            group_id: group_id.map(String::from),
        }
    }

    #[test]
    fn test_compare_counts() {
        for n in [0u64, 1, 3, 10_000] {
            assert_eq!(compare_counts(n, n), CountComparison::Match(n));
        }
        assert_eq!(
            compare_counts(10, 8),
            CountComparison::Mismatch {
                source: 10,
                destination: 8
            }
        );
        assert_eq!(
            compare_counts(0, 1),
            CountComparison::Mismatch {
                source: 0,
                destination: 1
            }
        );
    }

    #[test]
    fn test_compare_values_exact() {
        assert_eq!(
            compare_values(Some("a@example.com"), Some("a@example.com")),
            CompareResult::Match {
                value: Some("a@example.com".to_string())
            }
        );
        assert_eq!(
            compare_values(Some("a@example.com"), Some("A@example.com")),
            CompareResult::Mismatch {
                source: Some("a@example.com".to_string()),
                destination: Some("A@example.com".to_string()),
            }
        );
        assert_eq!(
            compare_values(None, None),
            CompareResult::Match { value: None }
        );
    }

    #[test]
    fn test_null_group_never_matches_null_string() {
        let result = compare_field(
            CheckedField::Group,
            &source(None, None, None),
            &destination(None, None, Some("null")),
        );
        assert!(!result.is_match());

        let result = compare_field(
            CheckedField::Group,
            &source(None, None, None),
            &destination(None, None, Some("")),
        );
        assert!(!result.is_match());

        let result = compare_field(
            CheckedField::Group,
            &source(None, None, None),
            &destination(None, None, None),
        );
        assert!(result.is_match());
    }

    #[test]
    fn test_compare_record_checks_three_fields_in_order() {
        let results = compare_record(
            &source(Some("x@example.com"), Some("Ann"), Some("g1")),
            &destination(Some("y@example.com"), Some("Ann"), Some("g1")),
        );

        let fields: Vec<CheckedField> = results.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![CheckedField::Email, CheckedField::Name, CheckedField::Group]
        );
        assert!(!results[0].1.is_match());
        assert!(results[1].1.is_match());
        assert!(results[2].1.is_match());
    }

    #[test]
    fn test_check_record_without_counterpart_compares_nothing() {
        let outcome = check_record(&source(Some("x@example.com"), None, None), None);
        assert_eq!(outcome, RecordOutcome::MissingCounterpart);

        let outcome = check_record(
            &source(Some("x@example.com"), None, None),
            Some(&destination(Some("x@example.com"), None, None)),
        );
        match outcome {
            RecordOutcome::Compared(results) => {
                assert_eq!(results.len(), 3);
                assert!(results.iter().all(|(_, r)| r.is_match()));
            }
            RecordOutcome::MissingCounterpart => panic!("expected field comparisons"),
        }
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "null");
        assert_eq!(display_value(Some("Ann")), "Ann");
    }
}
