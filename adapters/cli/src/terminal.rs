//! Text backend that prints scenes to a terminal.

use std::io::Write;

use anyhow::{Context, Result};
use robot_grid_rendering::{Presentation, RenderingBackend};

/// Writes each grid row as a line of glyphs, optionally painted with ANSI colours.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
    ansi: bool,
}

impl<W> TerminalBackend<W>
where
    W: Write,
{
    pub(crate) fn new(out: W, ansi: bool) -> Self {
        Self { out, ansi }
    }
}

impl<W> RenderingBackend for TerminalBackend<W>
where
    W: Write,
{
    fn present(&mut self, presentation: &Presentation) -> Result<()> {
        let scene = &presentation.scene;
        writeln!(
            self.out,
            "{} ({}x{})",
            presentation.title,
            scene.rows(),
            scene.columns()
        )?;

        if self.ansi {
            for row in scene.tiles().chunks(scene.columns() as usize) {
                for tile in row {
                    let [red, green, blue, _] = tile.style.color.to_rgba_u8();
                    if tile.style.color.is_transparent() {
                        write!(self.out, "{}", tile.style.glyph)?;
                    } else {
                        write!(
                            self.out,
                            "\x1b[48;2;{red};{green};{blue}m{}\x1b[0m",
                            tile.style.glyph
                        )?;
                    }
                }
                writeln!(self.out)?;
            }
        } else {
            write!(self.out, "{}", scene.to_text())?;
        }

        self.out.flush().context("failed to flush terminal output")
    }
}

#[cfg(test)]
mod tests {
    use robot_grid_core::{CellKind, GridSpec};
    use robot_grid_rendering::{GridScene, Palette};

    use super::*;

    fn presentation() -> Presentation {
        let grid = GridSpec::new(1, 2, vec![CellKind::Wall, CellKind::Robot]).expect("grid");
        let scene = GridScene::new(&grid, &Palette::default(), GridScene::DEFAULT_TILE_LENGTH)
            .expect("scene");
        Presentation::new("Robot Grid", scene)
    }

    #[test]
    fn plain_output_lists_glyph_rows() {
        let mut out = Vec::new();
        TerminalBackend::new(&mut out, false)
            .present(&presentation())
            .expect("present");

        assert_eq!(String::from_utf8(out).expect("utf-8"), "Robot Grid (1x2)\n#R\n");
    }

    #[test]
    fn ansi_output_paints_opaque_tiles_only() {
        let mut out = Vec::new();
        TerminalBackend::new(&mut out, true)
            .present(&presentation())
            .expect("present");

        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "Robot Grid (1x2)\n#\x1b[48;2;0;0;255mR\x1b[0m\n"
        );
    }
}
