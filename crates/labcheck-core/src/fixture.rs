//! Solution fixture decoding.
//!
//! Fixtures are loosely formatted text files. Each check picks a
//! [`FixtureKind`]; decoding aborts on the first line that does not fit the
//! expected shape.

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, FixtureResult};
use crate::evaluator::is_integer_token;
use crate::source::LineSource;

/// Decode mode for a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    /// One integer per line.
    IntegerList,
    /// Two whitespace-separated integers per line.
    PairList,
    /// Lines taken verbatim.
    LineList,
    /// Header carrying a total, then `<key> <count>` rows.
    Table,
}

/// Parsed contents of a solution fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Integers(Vec<i64>),
    Pairs(Vec<(i64, i64)>),
    Lines(Vec<String>),
    Table(ExpectedTable),
}

/// Header+table fixture body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedTable {
    pub declared_total: i64,
    /// Keyed rows in declared order.
    pub per_key: Vec<(String, i64)>,
}

/// Read `path` from `source` and decode it as `kind`.
pub fn load<S: LineSource + ?Sized>(
    source: &S,
    path: &str,
    kind: FixtureKind,
) -> FixtureResult<Expectation> {
    let lines = source.read_lines(path)?;
    decode(&lines, kind)
}

/// Decode already-read lines as `kind`.
pub fn decode(lines: &[String], kind: FixtureKind) -> FixtureResult<Expectation> {
    match kind {
        FixtureKind::IntegerList => parse_integers(lines).map(Expectation::Integers),
        FixtureKind::PairList => parse_pairs(lines).map(Expectation::Pairs),
        FixtureKind::LineList => Ok(Expectation::Lines(lines.to_vec())),
        FixtureKind::Table => parse_table(lines).map(Expectation::Table),
    }
}

pub fn parse_integers(lines: &[String]) -> FixtureResult<Vec<i64>> {
    lines
        .iter()
        .map(|line| {
            if !is_integer_token(line) {
                return Err(malformed(line));
            }
            line.parse::<i64>().map_err(|_| malformed(line))
        })
        .collect()
}

pub fn parse_pairs(lines: &[String]) -> FixtureResult<Vec<(i64, i64)>> {
    lines
        .iter()
        .map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [a, b] => {
                    let a = a.parse::<i64>().map_err(|_| malformed(line))?;
                    let b = b.parse::<i64>().map_err(|_| malformed(line))?;
                    Ok((a, b))
                }
                _ => Err(malformed(line)),
            }
        })
        .collect()
}

pub fn parse_table(lines: &[String]) -> FixtureResult<ExpectedTable> {
    let mut rows = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty());

    let header = rows
        .next()
        .ok_or_else(|| FixtureError::Malformed("empty fixture".to_string()))?;
    let declared_total = header
        .split_whitespace()
        .last()
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or_else(|| FixtureError::Malformed(format!("invalid total in header: {header}")))?;

    let per_key = rows
        .map(|line| {
            let (key, count) = line
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| malformed(line))?;
            let key = key.trim_end();
            let count = count
                .parse::<i64>()
                .map_err(|_| FixtureError::Malformed(format!("invalid count: {line}")))?;
            Ok((key.to_string(), count))
        })
        .collect::<FixtureResult<Vec<_>>>()?;

    Ok(ExpectedTable {
        declared_total,
        per_key,
    })
}

fn malformed(line: &str) -> FixtureError {
    FixtureError::Malformed(line.to_string())
}
