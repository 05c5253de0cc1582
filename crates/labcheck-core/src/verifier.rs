//! Comparison of computed results against parsed expectations.

use std::collections::HashMap;

use crate::aggregator::{AggregateEntry, AggregateResult};
use crate::fixture::ExpectedTable;
use crate::outcome::{Marker, VerificationOutcome};

/// Index-by-index comparison; positions are reported 1-based.
pub fn compare_list<T: PartialEq>(computed: &[T], expected: &[T]) -> VerificationOutcome {
    if computed.len() != expected.len() {
        return VerificationOutcome::LengthMismatch {
            expected: expected.len(),
            actual: computed.len(),
        };
    }

    let markers = computed
        .iter()
        .zip(expected)
        .enumerate()
        .filter(|(_, (got, want))| got != want)
        .map(|(idx, _)| Marker::position(idx + 1))
        .collect();
    VerificationOutcome::from_markers(markers)
}

/// Whole-sequence equality. A difference carries no position.
pub fn lines_match(computed: &[String], expected: &[String]) -> bool {
    computed == expected
}

/// Compare a header+table expectation with an aggregate.
///
/// The declared total is checked first and short-circuits. Each expected row
/// is then resolved positionally, falling back to a lookup by identifier when
/// the entry at that index has a different identifier or does not exist.
/// With duplicate identifiers the first occurrence wins.
pub fn compare_table(expected: &ExpectedTable, aggregate: &AggregateResult) -> VerificationOutcome {
    let actual_total = aggregate.total_matches() as i64;
    if expected.declared_total != actual_total {
        return VerificationOutcome::Mismatch {
            markers: vec![Marker::Total {
                expected: expected.declared_total,
                actual: actual_total,
            }],
        };
    }

    let entries = aggregate.per_input();
    let mut by_id: HashMap<&str, &AggregateEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        by_id.entry(entry.input_id()).or_insert(entry);
    }

    let mut markers = Vec::new();
    for (idx, (key, expected_count)) in expected.per_key.iter().enumerate() {
        let found = match entries.get(idx) {
            Some(entry) if entry.input_id() == key.as_str() => Some(entry),
            _ => by_id.get(key.as_str()).copied(),
        };

        match found {
            None => markers.push(Marker::MissingEntry { key: key.clone() }),
            Some(entry) => {
                let actual = entry.count() as i64;
                if actual != *expected_count {
                    markers.push(Marker::EntryMismatch {
                        key: key.clone(),
                        expected: *expected_count,
                        actual,
                    });
                }
            }
        }
    }
    VerificationOutcome::from_markers(markers)
}
