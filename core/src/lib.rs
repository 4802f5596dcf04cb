#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Robot Grid workspace.
//!
//! This crate defines the validated grid model that connects the input
//! systems with the presentation adapters. Systems turn raw input (per-cell
//! selections or preset text) into a [`GridSpec`], adapters consume the
//! immutable result. A [`GridSpec`] can only be obtained through
//! [`GridSpec::new`], so every value in circulation satisfies the grid
//! invariants: bounded dimensions, a row-major cell buffer of matching
//! length, and exactly one robot.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest number of rows or columns a grid may declare.
pub const MIN_SIZE: u32 = 1;

/// Largest number of rows or columns a grid may declare.
pub const MAX_SIZE: u32 = 20;

/// Selection labels in the order front ends present them to the user.
pub const SELECTION_LABELS: [&str; 5] = ["NONE", "WALL", "RESOURCE", "PIT", "ROBOT"];

/// Types of cells that can populate a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable wall segment.
    Wall,
    /// Collectable resource.
    Resource,
    /// Pit the robot must avoid.
    Pit,
    /// Free floor.
    Empty,
    /// Starting position of the robot.
    Robot,
}

impl CellKind {
    /// Every cell kind in preset ordinal order.
    pub const ALL: [CellKind; 5] = [
        CellKind::Wall,
        CellKind::Resource,
        CellKind::Pit,
        CellKind::Empty,
        CellKind::Robot,
    ];

    /// Numeric value used for the kind in preset files.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Wall => 0,
            Self::Resource => 1,
            Self::Pit => 2,
            Self::Empty => 3,
            Self::Robot => 4,
        }
    }

    /// Resolves a preset ordinal, returning `None` outside `0..=4`.
    #[must_use]
    pub const fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Wall),
            1 => Some(Self::Resource),
            2 => Some(Self::Pit),
            3 => Some(Self::Empty),
            4 => Some(Self::Robot),
            _ => None,
        }
    }

    /// Selection label associated with the kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wall => "WALL",
            Self::Resource => "RESOURCE",
            Self::Pit => "PIT",
            Self::Empty => "NONE",
            Self::Robot => "ROBOT",
        }
    }

    /// Resolves a selection label. Matching is exact and case-sensitive.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NONE" => Some(Self::Empty),
            "WALL" => Some(Self::Wall),
            "RESOURCE" => Some(Self::Resource),
            "PIT" => Some(Self::Pit),
            "ROBOT" => Some(Self::Robot),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Checked pair of grid dimensions, each within `MIN_SIZE..=MAX_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: u32,
    columns: u32,
}

impl GridSize {
    /// Validates the provided dimensions.
    pub fn new(rows: u32, columns: u32) -> Result<Self, GridError> {
        Self::checked(i64::from(rows), i64::from(columns))
    }

    /// Validates dimensions that may be negative or oversized, as read from user input.
    pub fn checked(rows: i64, columns: i64) -> Result<Self, GridError> {
        let bounds = i64::from(MIN_SIZE)..=i64::from(MAX_SIZE);
        if !bounds.contains(&rows) || !bounds.contains(&columns) {
            return Err(GridError::DimensionOutOfRange { rows, columns });
        }

        Ok(Self {
            rows: rows as u32,
            columns: columns as u32,
        })
    }

    /// Parses a size declaration typed by the user.
    ///
    /// Surrounding whitespace is ignored. Text that is not an integer is
    /// treated like an out-of-range value, so both cases surface as
    /// [`GridError::DimensionOutOfRange`].
    pub fn parse(rows: &str, columns: &str) -> Result<Self, GridError> {
        let rows = rows.trim().parse::<i64>().unwrap_or(0);
        let columns = columns.trim().parse::<i64>().unwrap_or(0);
        Self::checked(rows, columns)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells, `rows * columns`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Coordinate of the cell stored at the provided row-major index.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let columns = self.columns as usize;
        let column = u32::try_from(index % columns).ok()?;
        let row = u32::try_from(index / columns).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Row-major index of the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            Some(row * self.columns as usize + column)
        } else {
            None
        }
    }
}

/// Immutable, validated grid of cell kinds stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridSpec", into = "RawGridSpec")]
pub struct GridSpec {
    size: GridSize,
    cells: Vec<CellKind>,
    robot: usize,
}

impl GridSpec {
    /// Builds a grid after checking dimensions, buffer length and robot count, in that order.
    pub fn new(rows: u32, columns: u32, cells: Vec<CellKind>) -> Result<Self, GridError> {
        let size = GridSize::new(rows, columns)?;
        Self::with_size(size, cells)
    }

    /// Builds a grid for already checked dimensions.
    pub fn with_size(size: GridSize, cells: Vec<CellKind>) -> Result<Self, GridError> {
        if cells.len() != size.cell_count() {
            return Err(GridError::InvalidLength {
                expected: size.cell_count(),
                actual: cells.len(),
            });
        }

        let mut robots = cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind == CellKind::Robot)
            .map(|(index, _)| index);
        let robot = robots
            .next()
            .ok_or(GridError::RobotCountViolation(RobotViolation::Missing))?;
        if let Some(index) = robots.next() {
            return Err(GridError::RobotCountViolation(RobotViolation::Extra {
                index,
            }));
        }

        Ok(Self { size, cells, robot })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.size.rows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.size.columns()
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Kind of the cell at the provided coordinate.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.size
            .index_of(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Coordinate of the single robot.
    #[must_use]
    pub fn robot(&self) -> CellCoord {
        self.size
            .coord_of(self.robot)
            .unwrap_or_else(|| CellCoord::new(0, 0))
    }

    /// Iterator over the rows of the grid, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.size.columns() as usize)
    }

    /// Number of cells holding the provided kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }
}

/// Unchecked wire representation routed through [`GridSpec::new`] on deserialisation.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawGridSpec {
    rows: u32,
    columns: u32,
    cells: Vec<CellKind>,
}

impl TryFrom<RawGridSpec> for GridSpec {
    type Error = GridError;

    fn try_from(raw: RawGridSpec) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.columns, raw.cells)
    }
}

impl From<GridSpec> for RawGridSpec {
    fn from(grid: GridSpec) -> Self {
        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            cells: grid.cells,
        }
    }
}

/// Ways in which a grid can break the single-robot rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotViolation {
    /// No cell holds a robot.
    Missing,
    /// A second robot was found.
    Extra {
        /// Row-major index of the second robot.
        index: usize,
    },
}

impl fmt::Display for RobotViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "grid contains no robot"),
            Self::Extra { index } => write!(f, "second robot found at cell {index}"),
        }
    }
}

/// Reasons a grid could not be produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Rows or columns fall outside `MIN_SIZE..=MAX_SIZE`.
    #[error("grid size {rows}x{columns} is outside {MIN_SIZE}..={MAX_SIZE}")]
    DimensionOutOfRange {
        /// Declared number of rows.
        rows: i64,
        /// Declared number of columns.
        columns: i64,
    },
    /// The cell buffer does not hold `rows * columns` entries.
    #[error("expected {expected} cells but received {actual}")]
    InvalidLength {
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells provided.
        actual: usize,
    },
    /// A selection did not match any known label.
    #[error("cell {index} has unrecognized selection '{label}'")]
    UnrecognizedSelection {
        /// Row-major index of the offending selection.
        index: usize,
        /// Label that was supplied.
        label: String,
    },
    /// The grid does not contain exactly one robot.
    #[error("robot count violation: {0}")]
    RobotCountViolation(RobotViolation),
    /// The preset header does not hold two integers.
    #[error("malformed preset header '{line}'")]
    MalformedHeader {
        /// Header line as read, empty when the text had no lines.
        line: String,
    },
    /// A preset row is missing or holds a token that is not an integer.
    #[error("malformed preset row {row} at column {column}")]
    MalformedRow {
        /// Zero-based grid row.
        row: u32,
        /// Zero-based column of the missing or malformed token.
        column: u32,
    },
    /// A preset cell value lies outside the ordinal range.
    #[error("preset cell at row {row}, column {column} has invalid value {value}")]
    InvalidCellValue {
        /// Zero-based grid row.
        row: u32,
        /// Zero-based grid column.
        column: u32,
        /// Value that was read.
        value: i64,
    },
    /// The preset file could not be found or read.
    #[error("{reason}")]
    FileUnreadable {
        /// Path that was requested.
        path: String,
        /// Operating system error text.
        reason: String,
    },
}

/// Input mode that produced a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Grid assembled from per-cell selections.
    Selection,
    /// Grid loaded from a preset file.
    File,
}

/// Message shown when a size declaration is rejected.
pub const SIZE_MESSAGE: &str = "Incorrect input size\n 0 < Size < 21";

/// Message shown when a selection board is rejected.
pub const FIELD_MESSAGE: &str = "Incorrect field. Must be 1 robot and selected all fields";

/// Message shown when a preset file is rejected.
pub const PRESET_MESSAGE: &str = "Bad format for preset";

/// Failure paired with the input mode it originated from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct Failure {
    /// Mode the user was working in.
    pub mode: InputMode,
    /// Underlying grid error.
    pub error: GridError,
}

impl Failure {
    /// Pairs an error with the mode that produced it.
    #[must_use]
    pub const fn new(mode: InputMode, error: GridError) -> Self {
        Self { mode, error }
    }

    /// Fixed user-facing message for the failure category.
    #[must_use]
    pub fn user_message(&self) -> String {
        match (&self.error, self.mode) {
            (GridError::FileUnreadable { reason, .. }, _) => reason.clone(),
            (GridError::DimensionOutOfRange { .. }, InputMode::Selection) => {
                SIZE_MESSAGE.to_owned()
            }
            (_, InputMode::Selection) => FIELD_MESSAGE.to_owned(),
            (_, InputMode::File) => PRESET_MESSAGE.to_owned(),
        }
    }
}
