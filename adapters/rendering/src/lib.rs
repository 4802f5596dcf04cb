#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Robot Grid adapters.
//!
//! The core grid model carries no display attributes. This crate owns the
//! mapping from [`CellKind`] to colour and glyph (see [`Palette`]) and turns a
//! validated [`GridSpec`] into a [`GridScene`] that backends can present.

mod palette;

use anyhow::Result as AnyResult;
use glam::Vec2;
use robot_grid_core::{CellCoord, CellKind, GridSpec};
use std::{error::Error, fmt};

pub use palette::{CellStyle, Palette, SUPPORTED_PALETTE_VERSION};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba_u8(red, green, blue, 255)
    }

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }

    /// Converts the color back to byte RGBA channels.
    #[must_use]
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
            channel_to_u8(self.alpha),
        ]
    }

    /// Reports whether the color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Single cell of a [`GridScene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSprite {
    /// Grid cell the tile represents.
    pub cell: CellCoord,
    /// Kind of the cell.
    pub kind: CellKind,
    /// Colour and glyph resolved from the palette.
    pub style: CellStyle,
    /// Top-left corner of the tile in screen units.
    pub position: Vec2,
}

/// Presentation-ready description of a validated grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridScene {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<TileSprite>,
}

impl GridScene {
    /// Edge length of a tile when the adapter does not configure one.
    pub const DEFAULT_TILE_LENGTH: f32 = 62.0;

    /// Lays out one tile per grid cell in row-major order.
    ///
    /// Returns an error when `tile_length` is not a positive finite number.
    pub fn new(
        grid: &GridSpec,
        palette: &Palette,
        tile_length: f32,
    ) -> std::result::Result<Self, RenderingError> {
        if !tile_length.is_finite() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        let mut tiles = Vec::with_capacity(grid.cells().len());
        for (row, kinds) in (0u32..).zip(grid.iter_rows()) {
            for (column, kind) in (0u32..).zip(kinds) {
                tiles.push(TileSprite {
                    cell: CellCoord::new(column, row),
                    kind: *kind,
                    style: palette.style(*kind),
                    position: Vec2::new(column as f32, row as f32) * tile_length,
                });
            }
        }

        Ok(Self {
            columns: grid.columns(),
            rows: grid.rows(),
            tile_length,
            tiles,
        })
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total width of the scene.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the scene.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[TileSprite] {
        &self.tiles
    }

    /// Renders the scene as rows of glyphs, one line per grid row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.rows as usize);
        for row in self.tiles.chunks(self.columns.max(1) as usize) {
            out.extend(row.iter().map(|tile| tile.style.glyph));
            out.push('\n');
        }
        out
    }
}

/// Scene paired with the window metadata required to show it.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title of the window or panel displaying the grid.
    pub title: String,
    /// Scene describing the grid.
    pub scene: GridScene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: GridScene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Robot Grid scenes.
pub trait RenderingBackend {
    /// Presents the provided grid.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive and finite to avoid degenerate tiles.
    InvalidTileLength {
        /// Provided length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(
                    f,
                    "tile_length must be positive and finite (received {tile_length})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> GridSpec {
        GridSpec::new(
            2,
            3,
            vec![
                CellKind::Wall,
                CellKind::Resource,
                CellKind::Pit,
                CellKind::Empty,
                CellKind::Robot,
                CellKind::Empty,
            ],
        )
        .expect("valid grid")
    }

    #[test]
    fn scene_lays_out_tiles_row_major() {
        let scene = GridScene::new(&sample_grid(), &Palette::default(), 10.0).expect("scene");

        assert_eq!(scene.tiles().len(), 6);
        let robot = scene.tiles()[4];
        assert_eq!(robot.cell, CellCoord::new(1, 1));
        assert_eq!(robot.kind, CellKind::Robot);
        assert_eq!(robot.position, Vec2::new(10.0, 10.0));
        assert_eq!(scene.width(), 30.0);
        assert_eq!(scene.height(), 20.0);
    }

    #[test]
    fn scene_rejects_degenerate_tile_length() {
        for tile_length in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let error = GridScene::new(&sample_grid(), &Palette::default(), tile_length)
                .expect_err("degenerate tile length must be rejected");
            assert!(matches!(error, RenderingError::InvalidTileLength { .. }));
        }
    }

    #[test]
    fn text_rendering_uses_palette_glyphs() {
        let scene = GridScene::new(
            &sample_grid(),
            &Palette::default(),
            GridScene::DEFAULT_TILE_LENGTH,
        )
        .expect("scene");

        assert_eq!(scene.to_text(), "#$O\n.R.\n");
    }

    #[test]
    fn color_bytes_round_trip() {
        let color = Color::from_rgba_u8(12, 200, 255, 0);
        assert_eq!(color.to_rgba_u8(), [12, 200, 255, 0]);
        assert!(color.is_transparent());
        assert!(!Color::from_rgb_u8(0, 0, 0).is_transparent());
    }
}
