#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that builds, validates and displays Robot Grid layouts.

mod session;
mod terminal;

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use robot_grid_core::GridSpec;
use robot_grid_rendering::{GridScene, Palette, Presentation, RenderingBackend};
use robot_grid_system_preset::write_preset;

use crate::{
    session::{read_preset, select_grid, InteractiveSession},
    terminal::TerminalBackend,
};

/// Title shown above every rendered grid.
const PRESENTATION_TITLE: &str = "Robot Grid";

#[derive(Debug, Parser)]
#[command(name = "robot-grid")]
#[command(about = "Build a robot grid from selections or a preset file and display it")]
#[command(version)]
struct Cli {
    /// TOML palette manifest overriding cell colours and glyphs.
    #[arg(long, global = true, value_name = "PATH")]
    palette: Option<PathBuf>,

    /// Edge length of a rendered tile.
    #[arg(long, global = true, default_value_t = GridScene::DEFAULT_TILE_LENGTH)]
    tile_length: f32,

    /// Paint tiles with their palette colour using ANSI escape codes.
    #[arg(long, global = true)]
    color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a grid from a preset file.
    Load {
        /// Preset file to read.
        path: PathBuf,
    },
    /// Build a grid from per-cell labels (NONE, WALL, RESOURCE, PIT, ROBOT) in row-major order.
    Select {
        /// Number of rows.
        #[arg(long, allow_hyphen_values = true)]
        rows: String,
        /// Number of columns.
        #[arg(long, allow_hyphen_values = true)]
        columns: String,
        /// Write the validated grid to this path as a preset.
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
        /// Cell labels, one per cell.
        #[arg(required = true, num_args = 1..)]
        labels: Vec<String>,
    },
    /// Prompt for the input mode, size and cells on stdin, retrying after every rejection.
    Interactive,
}

/// Entry point for the Robot Grid command-line interface.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let palette = match &cli.palette {
        Some(path) => {
            debug!("loading palette manifest from {}", path.display());
            Palette::load(path)?
        }
        None => Palette::default(),
    };
    let mut backend = TerminalBackend::new(io::stdout(), cli.color);

    let mut output = None;
    let grid = match cli.command {
        Commands::Load { path } => {
            info!("loading preset from {}", path.display());
            read_preset(&path)
        }
        Commands::Select {
            rows,
            columns,
            output: path,
            labels,
        } => {
            output = path;
            select_grid(&rows, &columns, &labels)
        }
        Commands::Interactive => {
            let mut session = InteractiveSession::new(io::stdin().lock(), io::stderr());
            match session.run()? {
                Some(grid) => Ok(grid),
                None => return Ok(ExitCode::SUCCESS),
            }
        }
    };

    match grid {
        Ok(grid) => {
            let presentation = lay_out(&grid, &palette, cli.tile_length)?;
            if let Some(path) = output {
                export(&grid, &path)?;
            }
            backend.present(&presentation)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            warn!("rejected {:?} input: {}", failure.mode, failure.error);
            eprintln!("ERROR: {}", failure.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn lay_out(grid: &GridSpec, palette: &Palette, tile_length: f32) -> Result<Presentation> {
    let robot = grid.robot();
    info!(
        "presenting {}x{} grid with robot at column {}, row {}",
        grid.rows(),
        grid.columns(),
        robot.column(),
        robot.row()
    );
    let scene = GridScene::new(grid, palette, tile_length).context("failed to lay out grid")?;
    debug!("scene spans {}x{} px", scene.width(), scene.height());
    Ok(Presentation::new(PRESENTATION_TITLE, scene))
}

fn export(grid: &GridSpec, path: &Path) -> Result<()> {
    fs::write(path, write_preset(grid))
        .with_context(|| format!("failed to write preset to {}", path.display()))?;
    info!("wrote preset to {}", path.display());
    Ok(())
}
