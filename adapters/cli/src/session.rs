//! Input sessions that turn raw user input into validated grids.

use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::{debug, warn};
use robot_grid_core::{Failure, GridError, GridSize, GridSpec, InputMode, SELECTION_LABELS};
use robot_grid_system_preset::parse_preset;
use robot_grid_system_selection::{validate_selections, SelectionBoard};

/// Reads and parses a preset file.
pub(crate) fn read_preset(path: &Path) -> Result<GridSpec, Failure> {
    let text = fs::read_to_string(path).map_err(|error| {
        Failure::new(
            InputMode::File,
            GridError::FileUnreadable {
                path: path.display().to_string(),
                reason: error.to_string(),
            },
        )
    })?;
    parse_preset(&text).map_err(|error| Failure::new(InputMode::File, error))
}

/// Checks the declared size and validates the labels against it.
pub(crate) fn select_grid<S>(rows: &str, columns: &str, labels: &[S]) -> Result<GridSpec, Failure>
where
    S: AsRef<str>,
{
    let size = GridSize::parse(rows, columns).map_err(selection_failure)?;
    validate_selections(size, labels).map_err(selection_failure)
}

fn selection_failure(error: GridError) -> Failure {
    Failure::new(InputMode::Selection, error)
}

/// Line-oriented prompt loop mirroring the start screen of a graphical front end.
///
/// Every rejected attempt prints its message and returns to the mode prompt.
/// The session ends with the first valid grid, or when input runs out.
pub(crate) struct InteractiveSession<R, W> {
    input: R,
    output: W,
}

impl<R, W> InteractiveSession<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs attempts until one succeeds. Returns `None` on end of input.
    pub(crate) fn run(&mut self) -> Result<Option<GridSpec>> {
        loop {
            let Some(mode) = self.prompt("Mode [file/input]: ")? else {
                return Ok(None);
            };

            let attempt = match mode.trim().to_ascii_lowercase().as_str() {
                "file" | "f" => self.file_attempt()?,
                "input" | "i" => self.selection_attempt()?,
                "" => continue,
                other => {
                    writeln!(self.output, "unknown mode `{other}`; choose file or input")?;
                    continue;
                }
            };

            match attempt {
                None => return Ok(None),
                Some(Ok(grid)) => return Ok(Some(grid)),
                Some(Err(failure)) => {
                    warn!("rejected {:?} input: {}", failure.mode, failure.error);
                    writeln!(self.output, "ERROR: {}", failure.user_message())?;
                }
            }
        }
    }

    fn file_attempt(&mut self) -> Result<Option<Result<GridSpec, Failure>>> {
        let Some(path) = self.prompt("Preset path: ")? else {
            return Ok(None);
        };
        Ok(Some(read_preset(Path::new(path.trim()))))
    }

    fn selection_attempt(&mut self) -> Result<Option<Result<GridSpec, Failure>>> {
        let Some(rows) = self.prompt("Rows: ")? else {
            return Ok(None);
        };
        let Some(columns) = self.prompt("Columns: ")? else {
            return Ok(None);
        };
        let size = match GridSize::parse(&rows, &columns) {
            Ok(size) => size,
            Err(error) => return Ok(Some(Err(selection_failure(error)))),
        };

        let mut board = SelectionBoard::new(size);
        let choices = SELECTION_LABELS.join(" ");
        for row in 0..size.rows() {
            let prompt = format!(
                "Row {} of {} ({} labels from {choices}): ",
                row + 1,
                size.rows(),
                size.columns()
            );
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            let labels: Vec<&str> = line.split_whitespace().collect();
            let updated = board.select_row(row, &labels);
            debug!("row {row}: {updated} of {} cells selected", size.columns());
        }

        let unselected = board.unselected();
        if unselected > 0 {
            writeln!(self.output, "{unselected} cell(s) left unselected")?;
        }
        Ok(Some(board.validate().map_err(selection_failure)))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
