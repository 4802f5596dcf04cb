#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure preset system that reads and writes the whitespace-delimited grid format.
//!
//! A preset starts with a header line holding the column count followed by
//! the row count. Each of the next `rows` lines holds at least `columns`
//! integer tokens, one per cell, using the [`CellKind::ordinal`] mapping.
//! Surplus tokens on a row and surplus lines after the last row are ignored.

use robot_grid_core::{CellKind, GridError, GridSize, GridSpec};

/// Parses preset text into a grid, reporting the first problem encountered.
pub fn parse_preset(text: &str) -> Result<GridSpec, GridError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    let size = parse_header(header)?;

    let mut cells = Vec::with_capacity(size.cell_count());
    for row in 0..size.rows() {
        let mut tokens = lines.next().unwrap_or_default().split_whitespace();
        for column in 0..size.columns() {
            let value = tokens
                .next()
                .and_then(parse_integer)
                .ok_or(GridError::MalformedRow { row, column })?;
            let kind = u8::try_from(value)
                .ok()
                .and_then(CellKind::from_ordinal)
                .ok_or(GridError::InvalidCellValue { row, column, value })?;
            cells.push(kind);
        }
    }

    GridSpec::with_size(size, cells)
}

/// Renders a grid in preset format. The output parses back to an equal grid.
#[must_use]
pub fn write_preset(grid: &GridSpec) -> String {
    let mut out = format!("{} {}\n", grid.columns(), grid.rows());
    for row in grid.iter_rows() {
        let line = row
            .iter()
            .map(|kind| kind.ordinal().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn parse_header(line: &str) -> Result<GridSize, GridError> {
    let malformed = || GridError::MalformedHeader {
        line: line.to_owned(),
    };

    let mut tokens = line.split_whitespace();
    let columns = tokens
        .next()
        .and_then(parse_integer)
        .ok_or_else(malformed)?;
    let rows = tokens
        .next()
        .and_then(parse_integer)
        .ok_or_else(malformed)?;

    GridSize::checked(rows, columns)
}

/// Reads an optionally signed run of ASCII digits.
///
/// Literals beyond the `i64` range saturate, so they surface as range
/// errors rather than as malformed tokens.
fn parse_integer(token: &str) -> Option<i64> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    match token.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) if token.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}
