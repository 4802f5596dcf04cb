use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use robot_grid_core::CellKind;
use serde::Deserialize;

use crate::Color;

/// Palette manifest version understood by [`Palette::from_manifest_str`].
pub const SUPPORTED_PALETTE_VERSION: u32 = 1;

/// Colour and glyph used to present one kind of cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    /// Fill colour of the tile.
    pub color: Color,
    /// Character used by text backends.
    pub glyph: char,
}

impl CellStyle {
    /// Creates a new style.
    #[must_use]
    pub const fn new(color: Color, glyph: char) -> Self {
        Self { color, glyph }
    }
}

/// Presentation table mapping every cell kind to a style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    wall: CellStyle,
    resource: CellStyle,
    pit: CellStyle,
    empty: CellStyle,
    robot: CellStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: CellStyle::new(Color::TRANSPARENT, '#'),
            resource: CellStyle::new(Color::from_rgb_u8(0, 255, 0), '$'),
            pit: CellStyle::new(Color::from_rgb_u8(128, 128, 128), 'O'),
            empty: CellStyle::new(Color::from_rgb_u8(255, 255, 255), '.'),
            robot: CellStyle::new(Color::from_rgb_u8(0, 0, 255), 'R'),
        }
    }
}

impl Palette {
    /// Style used for the provided kind.
    #[must_use]
    pub const fn style(&self, kind: CellKind) -> CellStyle {
        match kind {
            CellKind::Wall => self.wall,
            CellKind::Resource => self.resource,
            CellKind::Pit => self.pit,
            CellKind::Empty => self.empty,
            CellKind::Robot => self.robot,
        }
    }

    fn style_mut(&mut self, kind: CellKind) -> &mut CellStyle {
        match kind {
            CellKind::Wall => &mut self.wall,
            CellKind::Resource => &mut self.resource,
            CellKind::Pit => &mut self.pit,
            CellKind::Empty => &mut self.empty,
            CellKind::Robot => &mut self.robot,
        }
    }

    /// Loads a palette manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read palette manifest at {}", path.display()))?;
        Self::from_manifest_str(&contents)
            .with_context(|| format!("invalid palette manifest at {}", path.display()))
    }

    /// Builds a palette from TOML manifest contents.
    ///
    /// Kinds absent from the manifest keep their default style. Within an
    /// entry, omitted fields also fall back to the default.
    pub fn from_manifest_str(contents: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(contents).context("failed to parse palette manifest toml contents")?;
        if manifest.version != SUPPORTED_PALETTE_VERSION {
            bail!(
                "unsupported palette manifest version {}; expected {}",
                manifest.version,
                SUPPORTED_PALETTE_VERSION
            );
        }

        let mut palette = Self::default();
        for (name, entry) in manifest.cells {
            let kind = parse_cell_key(&name)?;
            let style = palette.style_mut(kind);
            let [red, green, blue, alpha] = style.color.to_rgba_u8();
            let [red, green, blue] = entry.rgb.unwrap_or([red, green, blue]);
            let alpha = entry.alpha.unwrap_or(alpha);
            style.color = Color::from_rgba_u8(red, green, blue, alpha);
            if let Some(glyph) = entry.glyph {
                style.glyph = parse_glyph(&glyph)
                    .with_context(|| format!("invalid glyph for `{name}` in palette manifest"))?;
            }
        }

        Ok(palette)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default)]
    cells: BTreeMap<String, CellEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellEntry {
    rgb: Option<[u8; 3]>,
    alpha: Option<u8>,
    glyph: Option<String>,
}

fn parse_cell_key(name: &str) -> Result<CellKind> {
    match name {
        "Wall" => Ok(CellKind::Wall),
        "Resource" => Ok(CellKind::Resource),
        "Pit" => Ok(CellKind::Pit),
        "Empty" => Ok(CellKind::Empty),
        "Robot" => Ok(CellKind::Robot),
        _ => bail!("unknown cell key `{name}` in palette manifest"),
    }
}

fn parse_glyph(glyph: &str) -> Result<char> {
    let mut chars = glyph.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) if !glyph.is_whitespace() => Ok(glyph),
        _ => bail!("glyph must be a single visible character, found `{glyph}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_classic_colours() {
        let palette = Palette::default();

        assert!(palette.style(CellKind::Wall).color.is_transparent());
        assert_eq!(
            palette.style(CellKind::Resource).color,
            Color::from_rgb_u8(0, 255, 0)
        );
        assert_eq!(
            palette.style(CellKind::Pit).color,
            Color::from_rgb_u8(128, 128, 128)
        );
        assert_eq!(
            palette.style(CellKind::Empty).color,
            Color::from_rgb_u8(255, 255, 255)
        );
        assert_eq!(
            palette.style(CellKind::Robot).color,
            Color::from_rgb_u8(0, 0, 255)
        );
    }

    #[test]
    fn every_kind_has_a_distinct_glyph() {
        let palette = Palette::default();
        let mut glyphs: Vec<char> = CellKind::ALL
            .iter()
            .map(|kind| palette.style(*kind).glyph)
            .collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), CellKind::ALL.len());
    }

    #[test]
    fn manifest_overrides_selected_fields() {
        let manifest = r#"
            version = 1

            [cells.Wall]
            rgb = [40, 40, 40]
            alpha = 255

            [cells.Robot]
            glyph = "@"
        "#;

        let palette = Palette::from_manifest_str(manifest).expect("manifest parses");

        assert_eq!(
            palette.style(CellKind::Wall),
            CellStyle::new(Color::from_rgb_u8(40, 40, 40), '#')
        );
        assert_eq!(
            palette.style(CellKind::Robot),
            CellStyle::new(Color::from_rgb_u8(0, 0, 255), '@')
        );
        assert_eq!(
            palette.style(CellKind::Pit),
            Palette::default().style(CellKind::Pit)
        );
    }

    #[test]
    fn manifest_without_cells_yields_default_palette() {
        let palette = Palette::from_manifest_str("version = 1").expect("manifest parses");
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn manifest_rejects_unsupported_version() {
        let error = Palette::from_manifest_str("version = 2").expect_err("version 2 rejected");
        assert!(error.to_string().contains("unsupported palette manifest version"));
    }

    #[test]
    fn manifest_rejects_unknown_cell_keys() {
        let manifest = r#"
            version = 1

            [cells.Lava]
            glyph = "~"
        "#;

        let error = Palette::from_manifest_str(manifest).expect_err("unknown key rejected");
        assert!(error.to_string().contains("Lava"));
    }

    #[test]
    fn manifest_rejects_multi_character_glyphs() {
        let manifest = r#"
            version = 1

            [cells.Pit]
            glyph = "OO"
        "#;

        assert!(Palette::from_manifest_str(manifest).is_err());
    }
}
