#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure selection-mode system that turns per-cell label choices into a grid.

use robot_grid_core::{CellCoord, CellKind, GridError, GridSize, GridSpec, RobotViolation};

/// Validates an ordered, row-major sequence of selection labels.
///
/// The scan stops at the first problem. A second `ROBOT` label is reported
/// before any label lookup on that cell, so it takes precedence over
/// unrecognized labels that appear later in the sequence.
pub fn validate_selections<S>(size: GridSize, selections: &[S]) -> Result<GridSpec, GridError>
where
    S: AsRef<str>,
{
    if selections.len() != size.cell_count() {
        return Err(GridError::InvalidLength {
            expected: size.cell_count(),
            actual: selections.len(),
        });
    }

    let mut seen_robot = false;
    let mut cells = Vec::with_capacity(selections.len());
    for (index, selection) in selections.iter().enumerate() {
        let label = selection.as_ref();
        if label == CellKind::Robot.label() {
            if seen_robot {
                return Err(GridError::RobotCountViolation(RobotViolation::Extra {
                    index,
                }));
            }
            seen_robot = true;
        }

        let kind = CellKind::from_label(label).ok_or_else(|| GridError::UnrecognizedSelection {
            index,
            label: label.to_owned(),
        })?;
        cells.push(kind);
    }

    if !seen_robot {
        return Err(GridError::RobotCountViolation(RobotViolation::Missing));
    }

    GridSpec::with_size(size, cells)
}

/// Per-cell selection buffer filled in by an interactive front end.
///
/// A board lives for a single attempt. Declaring a new size means creating a
/// new board, every cell of which starts unselected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionBoard {
    size: GridSize,
    labels: Vec<String>,
}

impl SelectionBoard {
    /// Creates a board with every cell unselected.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            labels: vec![String::new(); size.cell_count()],
        }
    }

    /// Records the label chosen for a cell.
    ///
    /// Returns `false` without changing the board when the coordinate lies
    /// outside it.
    pub fn select(&mut self, cell: CellCoord, label: impl Into<String>) -> bool {
        match self
            .size
            .index_of(cell)
            .and_then(|index| self.labels.get_mut(index))
        {
            Some(slot) => {
                *slot = label.into();
                true
            }
            None => false,
        }
    }

    /// Records the labels of one row, left to right.
    ///
    /// Labels beyond the board width are ignored. Returns the number of cells updated.
    pub fn select_row<S>(&mut self, row: u32, labels: &[S]) -> usize
    where
        S: AsRef<str>,
    {
        let mut updated = 0;
        for (column, label) in labels.iter().enumerate() {
            let Ok(column) = u32::try_from(column) else {
                break;
            };
            if self.select(CellCoord::new(column, row), label.as_ref()) {
                updated += 1;
            }
        }
        updated
    }

    /// Labels currently held by the board in row-major order. Unselected cells are empty.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of cells that still have no selection.
    #[must_use]
    pub fn unselected(&self) -> usize {
        self.labels.iter().filter(|label| label.is_empty()).count()
    }

    /// Validates the board contents.
    pub fn validate(&self) -> Result<GridSpec, GridError> {
        validate_selections(self.size, &self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_starts_unselected() {
        let board = SelectionBoard::new(GridSize::new(2, 3).expect("size"));
        assert_eq!(board.labels().len(), 6);
        assert_eq!(board.unselected(), 6);
        assert!(matches!(
            board.validate(),
            Err(GridError::UnrecognizedSelection { index: 0, .. })
        ));
    }

    #[test]
    fn select_ignores_cells_outside_board() {
        let mut board = SelectionBoard::new(GridSize::new(1, 1).expect("size"));
        assert!(!board.select(CellCoord::new(1, 0), "ROBOT"));
        assert!(board.select(CellCoord::new(0, 0), "ROBOT"));
        assert_eq!(board.unselected(), 0);
    }

    #[test]
    fn select_row_truncates_to_board_width() {
        let mut board = SelectionBoard::new(GridSize::new(2, 2).expect("size"));
        assert_eq!(board.select_row(1, &["WALL", "PIT", "ROBOT"]), 2);
        assert_eq!(board.labels(), ["", "", "WALL", "PIT"]);
    }
}
