//! Multi-input aggregation of the line filter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::evaluator::{char_tally, line_filter, Tally};
use crate::source::LineSource;

/// Result of scanning a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputScan {
    pub count: usize,
    pub lines: Vec<String>,
    pub tallies: Vec<Tally>,
}

/// Why an input could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanErrorKind {
    Missing,
    Unreadable(String),
}

/// One per-input row of an [`AggregateResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AggregateEntry {
    Scanned { input_id: String, scan: InputScan },
    Failed { input_id: String, error: ScanErrorKind },
}

impl AggregateEntry {
    pub fn input_id(&self) -> &str {
        match self {
            AggregateEntry::Scanned { input_id, .. } | AggregateEntry::Failed { input_id, .. } => {
                input_id
            }
        }
    }

    /// Match count; failed entries count as zero.
    pub fn count(&self) -> usize {
        match self {
            AggregateEntry::Scanned { scan, .. } => scan.count,
            AggregateEntry::Failed { .. } => 0,
        }
    }
}

/// Combined result of scanning several named inputs.
///
/// Totals are only updated through [`AggregateResult::push`], which keeps
/// `total_matches` and `inputs_with_hits` consistent with `per_input`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    total_inputs: usize,
    inputs_with_hits: usize,
    total_matches: usize,
    per_input: Vec<AggregateEntry>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: AggregateEntry) {
        if let AggregateEntry::Scanned { scan, .. } = &entry {
            self.total_matches += scan.count;
            if scan.count > 0 {
                self.inputs_with_hits += 1;
            }
        }
        self.total_inputs += 1;
        self.per_input.push(entry);
    }

    pub fn total_inputs(&self) -> usize {
        self.total_inputs
    }

    pub fn inputs_with_hits(&self) -> usize {
        self.inputs_with_hits
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn per_input(&self) -> &[AggregateEntry] {
        &self.per_input
    }
}

impl FromIterator<AggregateEntry> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = AggregateEntry>>(iter: I) -> Self {
        let mut result = AggregateResult::new();
        for entry in iter {
            result.push(entry);
        }
        result
    }
}

/// Filter one input and tally every matched line.
pub fn scan_one<S: LineSource + ?Sized>(
    source: &S,
    input_id: &str,
    needle: &str,
) -> SourceResult<InputScan> {
    let lines = line_filter(source, input_id, needle)?;
    let tallies = lines.iter().map(|line| char_tally(line)).collect();
    Ok(InputScan {
        count: lines.len(),
        lines,
        tallies,
    })
}

/// Scan every input in order. A failing input is recorded and skipped.
pub fn scan_many<S, I>(source: &S, input_ids: I, needle: &str) -> AggregateResult
where
    S: LineSource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut result = AggregateResult::new();
    for input_id in input_ids {
        let input_id = input_id.as_ref();
        let entry = match scan_one(source, input_id, needle) {
            Ok(scan) => {
                debug!(input_id = %input_id, count = scan.count, "Scanned input");
                AggregateEntry::Scanned {
                    input_id: input_id.to_string(),
                    scan,
                }
            }
            Err(SourceError::NotFound(_)) => {
                debug!(input_id = %input_id, "Input missing");
                AggregateEntry::Failed {
                    input_id: input_id.to_string(),
                    error: ScanErrorKind::Missing,
                }
            }
            Err(e) => {
                debug!(input_id = %input_id, error = %e, "Input unreadable");
                AggregateEntry::Failed {
                    input_id: input_id.to_string(),
                    error: ScanErrorKind::Unreadable(e.to_string()),
                }
            }
        };
        result.push(entry);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryLineSource;

    fn source() -> MemoryLineSource {
        MemoryLineSource::new()
            .with_lines("a.txt", &["break +*", "nothing", "break ++"])
            .with_lines("b.txt", &["no hits"])
            .with_failure("c.txt")
    }

    #[test]
    fn test_scan_one_tallies_matched_lines() {
        let scan = scan_one(&source(), "a.txt", "break").unwrap();
        assert_eq!(scan.count, 2);
        assert_eq!(scan.lines, vec!["break +*", "break ++"]);
        assert_eq!(scan.tallies, vec![Tally::new(1, 1), Tally::new(2, 0)]);
    }

    #[test]
    fn test_scan_one_propagates_not_found() {
        let err = scan_one(&source(), "missing.txt", "break").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scan_many_continues_past_failures() {
        let agg = scan_many(
            &source(),
            ["a.txt", "missing.txt", "b.txt", "c.txt"],
            "break",
        );
        assert_eq!(agg.total_inputs(), 4);
        assert_eq!(agg.inputs_with_hits(), 1);
        assert_eq!(agg.total_matches(), 2);

        let ids: Vec<&str> = agg.per_input().iter().map(|e| e.input_id()).collect();
        assert_eq!(ids, vec!["a.txt", "missing.txt", "b.txt", "c.txt"]);
        assert!(matches!(
            agg.per_input()[1],
            AggregateEntry::Failed {
                error: ScanErrorKind::Missing,
                ..
            }
        ));
        assert!(matches!(
            agg.per_input()[3],
            AggregateEntry::Failed {
                error: ScanErrorKind::Unreadable(_),
                ..
            }
        ));
    }

    #[test]
    fn test_push_keeps_invariants() {
        let agg: AggregateResult = vec![
            AggregateEntry::Scanned {
                input_id: "x".to_string(),
                scan: InputScan {
                    count: 3,
                    ..Default::default()
                },
            },
            AggregateEntry::Scanned {
                input_id: "y".to_string(),
                scan: InputScan::default(),
            },
            AggregateEntry::Failed {
                input_id: "z".to_string(),
                error: ScanErrorKind::Missing,
            },
        ]
        .into_iter()
        .collect();

        let sum: usize = agg.per_input().iter().map(AggregateEntry::count).sum();
        assert_eq!(agg.total_matches(), sum);
        assert_eq!(agg.inputs_with_hits(), 1);
        assert_eq!(agg.total_inputs(), 3);
    }

    #[test]
    fn test_empty_batch() {
        let agg = scan_many(&source(), Vec::<String>::new(), "break");
        assert_eq!(agg, AggregateResult::new());
    }
}
