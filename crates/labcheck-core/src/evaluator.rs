//! Metric evaluators.
//!
//! Pure functions over a single record. `line_filter` is the only one that
//! reads, and it does so through an injected [`LineSource`].

use serde::{Deserialize, Serialize};

use crate::error::SourceResult;
use crate::source::LineSource;

/// One matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Number(i64),
    /// Empty or absent.
    Blank,
    Text(String),
}

impl Cell {
    /// Classify a raw token. Integer-looking tokens become `Number`.
    pub fn parse(token: &str) -> Self {
        if token.is_empty() {
            return Cell::Blank;
        }
        if is_integer_token(token) {
            if let Ok(n) = token.parse::<i64>() {
                return Cell::Number(n);
            }
        }
        Cell::Text(token.to_string())
    }

    /// Whether this cell disqualifies the row that holds it.
    pub fn disqualifies(&self) -> bool {
        matches!(self, Cell::Number(0) | Cell::Blank)
    }
}

/// A matrix is a sequence of rows of cells.
pub type Matrix = Vec<Vec<Cell>>;

/// Count of `'+'` and `'*'` characters in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    pub pluses: usize,
    pub stars: usize,
}

impl Tally {
    pub fn new(pluses: usize, stars: usize) -> Self {
        Self { pluses, stars }
    }
}

/// `true` for `digits` or `-digits`, at least one ASCII digit.
pub fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Number of rows that contain no disqualifying cell.
pub fn matrix_completeness(matrix: &[Vec<Cell>]) -> usize {
    let disqualified = matrix
        .iter()
        .filter(|row| row.iter().any(Cell::disqualifies))
        .count();
    matrix.len() - disqualified
}

/// Count `'+'` and `'*'` in one pass.
pub fn char_tally(text: &str) -> Tally {
    text.chars().fold(Tally::default(), |mut tally, ch| {
        match ch {
            '+' => tally.pluses += 1,
            '*' => tally.stars += 1,
            _ => {}
        }
        tally
    })
}

/// Lines of `input_id` that contain `needle`, in order.
pub fn line_filter<S: LineSource + ?Sized>(
    source: &S,
    input_id: &str,
    needle: &str,
) -> SourceResult<Vec<String>> {
    let lines = source.read_lines(input_id)?;
    Ok(lines
        .into_iter()
        .filter(|line| line.contains(needle))
        .collect())
}

/// Split matrix test lines into blocks.
///
/// Any line containing `-` closes the current block. A trailing block is kept
/// only when it has at least one row.
pub fn parse_matrix_blocks(lines: &[String]) -> Vec<Matrix> {
    let mut blocks = Vec::new();
    let mut current: Matrix = Vec::new();

    for line in lines {
        if line.contains('-') {
            blocks.push(std::mem::take(&mut current));
        } else {
            current.push(line.split_whitespace().map(Cell::parse).collect());
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
