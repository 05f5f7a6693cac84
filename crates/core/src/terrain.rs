//! Terrain grid and map generator.

use rand::Rng;

use crate::rng::pick_weighted;
use crate::types::{Bounds, GlyphIndex, GLYPH_EMPTY, TERRAIN_GLYPHS, TERRAIN_WEIGHTS};

/// Flat, row-major grid of glyph indices.
///
/// Cell `i` lives at row `i / width`, column `i % width`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerrainGrid {
    height: usize,
    width: usize,
    cells: Vec<GlyphIndex>,
}

impl TerrainGrid {
    /// Generate a random grid.
    ///
    /// Each cell is drawn independently from [`TERRAIN_GLYPHS`] using
    /// [`TERRAIN_WEIGHTS`]. A zero-area request produces an empty grid.
    pub fn generate<R: Rng + ?Sized>(height: usize, width: usize, rng: &mut R) -> Self {
        let cells = (0..height * width)
            .map(|_| pick_weighted(rng, &TERRAIN_GLYPHS, &TERRAIN_WEIGHTS).unwrap_or(GLYPH_EMPTY))
            .collect();
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.height, self.width)
    }

    pub fn cells(&self) -> &[GlyphIndex] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Glyph at `(y, x)`, if in range.
    pub fn get(&self, y: usize, x: usize) -> Option<GlyphIndex> {
        if y >= self.height || x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }
}
