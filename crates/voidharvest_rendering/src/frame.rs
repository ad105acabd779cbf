//! Ready-made content producers: rectangular panels and the TV frame.

use crate::content::{Anchor, Bounds, Layer, Renderable, Z_FRAME};
use crate::glyph::{Glyph, Rgb};

/// A rectangular block of glyphs at a fixed layer, Z, and anchor.
///
/// The workhorse producer for hosts and tests: backgrounds, fills, and
/// pre-rendered panels all reduce to a cell grid.
pub struct GlyphPanel {
    layer: Layer,
    z: i32,
    anchor: Anchor,
    cells: Vec<Vec<Glyph>>,
}

impl GlyphPanel {
    /// Creates a panel from an explicit cell grid.
    #[must_use]
    pub fn from_cells(layer: Layer, z: i32, cells: Vec<Vec<Glyph>>) -> Self {
        Self {
            layer,
            z,
            anchor: Anchor::top_left(),
            cells,
        }
    }

    /// Creates a panel of `bounds` dimensions filled with one glyph.
    #[must_use]
    pub fn filled(layer: Layer, z: i32, bounds: Bounds, glyph: Glyph) -> Self {
        Self::from_cells(layer, z, vec![vec![glyph; bounds.width]; bounds.height])
    }

    /// Replaces the anchor.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    /// Writes one cell of the panel. Out-of-range writes are dropped.
    pub fn set_cell(&mut self, x: usize, y: usize, glyph: Glyph) {
        if let Some(row) = self.cells.get_mut(y) {
            if let Some(cell) = row.get_mut(x) {
                *cell = glyph;
            }
        }
    }
}

impl Renderable for GlyphPanel {
    fn layer(&self) -> Layer {
        self.layer
    }

    fn z(&self) -> i32 {
        self.z
    }

    fn anchor(&self) -> Anchor {
        self.anchor
    }

    fn bounds(&self) -> Bounds {
        let height = self.cells.len();
        let width = self.cells.first().map_or(0, Vec::len);
        Bounds::new(width, height)
    }

    fn glyphs(&self) -> Vec<Vec<Glyph>> {
        self.cells.clone()
    }
}

/// Opaque border drawn around the whole canvas on the `TvFrame` layer.
///
/// Fills a `padding`-cell band along every edge with solid block glyphs,
/// leaving the interior untouched.
pub struct TvFrame {
    width: usize,
    height: usize,
    padding: usize,
    color: Rgb,
}

impl TvFrame {
    /// Glyph used for the frame band.
    const BLOCK: char = '█';

    /// Creates a frame for a `width x height` canvas with the conventional
    /// 3-cell padding.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_padding(width, height, 3)
    }

    /// Creates a frame with an explicit band thickness.
    #[must_use]
    pub fn with_padding(width: usize, height: usize, padding: usize) -> Self {
        Self {
            width,
            height,
            padding,
            color: Rgb::UNSET,
        }
    }

    /// Replaces the frame color.
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    fn in_band(&self, x: usize, y: usize) -> bool {
        x < self.padding
            || y < self.padding
            || x >= self.width.saturating_sub(self.padding)
            || y >= self.height.saturating_sub(self.padding)
    }
}

impl Renderable for TvFrame {
    fn layer(&self) -> Layer {
        Layer::TvFrame
    }

    fn z(&self) -> i32 {
        Z_FRAME
    }

    fn anchor(&self) -> Anchor {
        Anchor::top_left()
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    fn glyphs(&self) -> Vec<Vec<Glyph>> {
        let mut cells = vec![vec![Glyph::default(); self.width]; self.height];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if self.in_band(x, y) {
                    *cell = Glyph::solid(Self::BLOCK, self.color).with_bg(self.color);
                }
            }
        }
        cells
    }
}
