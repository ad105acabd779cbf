//! The layered compositor: Z-ordered alpha blending into a styled grid.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::Instant;

use tracing::trace;

use crate::content::{resolve_position, Layer, Renderable};
use crate::glyph::{BlendMode, Glyph, Rgb, StyleFlags};
use crate::matrix::GlyphMatrix;
use crate::wcwidth::rune_width;

const RESET: &str = "\x1b[0m";

/// A dirty rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
}

/// One repainted line: `(row, styled string)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePatch {
    /// Row index.
    pub y: i32,
    /// Styled line content.
    pub line: String,
}

/// Composites registered content producers into a styled character grid.
///
/// Content is gathered across layers back to front (`Game` through
/// `TvFrame`), stable-sorted by Z within each layer so later registration
/// wins ties, then blended cell by cell. `render` produces the full grid;
/// `render_patch` recomposes and emits only rows touched since the last
/// patch.
pub struct Compositor {
    width: usize,
    height: usize,
    layers: HashMap<Layer, Vec<Box<dyn Renderable>>>,
    matrix: GlyphMatrix,
    dirty: Vec<Rect>,
    dirty_all: bool,
}

impl Compositor {
    /// Creates a compositor for a `width x height` cell canvas.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            layers: HashMap::new(),
            matrix: GlyphMatrix::new(width, height),
            dirty: Vec::new(),
            dirty_all: true,
        }
    }

    /// Resizes the canvas, discarding the previous cell buffer and forcing
    /// a full repaint.
    pub fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.matrix = GlyphMatrix::new(width, height);
        self.dirty.clear();
        self.dirty_all = true;
    }

    /// Current canvas dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Registers a content producer for this frame.
    pub fn register_content(&mut self, content: Box<dyn Renderable>) {
        self.layers.entry(content.layer()).or_default().push(content);
    }

    /// Drops every registered producer and forces a full repaint.
    pub fn unregister_all(&mut self) {
        for slot in self.layers.values_mut() {
            slot.clear();
        }
        self.mark_dirty_all();
    }

    /// Marks a rectangle of cells as needing repaint.
    pub fn mark_dirty(&mut self, x: i32, y: i32, w: i32, h: i32) {
        // Row-coalesce: extend the previous rect when the new cell
        // continues the same row span.
        if h == 1 {
            if let Some(last) = self.dirty.last_mut() {
                if last.h == 1 && last.y == y && last.x + last.w == x {
                    last.w += w;
                    return;
                }
            }
        }
        self.dirty.push(Rect { x, y, w, h });
    }

    /// Forces the next render or patch to repaint every row.
    pub fn mark_dirty_all(&mut self) {
        self.dirty_all = true;
    }

    /// The rectangles rewritten by the most recent composition.
    #[must_use]
    pub fn dirty_regions(&self) -> Vec<Rect> {
        if self.dirty_all {
            return vec![Rect {
                x: 0,
                y: 0,
                w: self.width as i32,
                h: self.height as i32,
            }];
        }
        self.dirty.clone()
    }

    /// Composites all content and serializes the full styled grid.
    ///
    /// Returns the empty string when either dimension is zero. Dirty
    /// regions accumulated by the composition stay queryable until the
    /// next `render_patch`.
    pub fn render(&mut self) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }
        let profile = profile_start();
        self.compose();
        let composed = profile.map(|start| start.elapsed());
        let mut out = String::with_capacity(self.width * self.height * 2);
        for y in 0..self.height as i32 {
            self.stringify_line(y, &mut out);
            out.push('\n');
        }
        if let (Some(start), Some(composed)) = (profile, composed) {
            eprintln!(
                "[compositor] compose={composed:?} stringify={:?}",
                start.elapsed() - composed
            );
        }
        out
    }

    /// Composites all content and serializes only dirty rows, ascending.
    ///
    /// Consumes the dirty set; `mark_dirty_all` (or a resize) yields a
    /// patch covering every row.
    pub fn render_patch(&mut self) -> Vec<LinePatch> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }
        let profile = profile_start();
        self.compose();
        let composed = profile.map(|start| start.elapsed());
        let rows = self.dirty_rows();
        let mut patches = Vec::with_capacity(rows.len());
        for y in rows {
            let mut line = String::with_capacity(self.width * 2);
            self.stringify_line(y, &mut line);
            patches.push(LinePatch { y, line });
        }
        self.dirty.clear();
        self.dirty_all = false;
        if let (Some(start), Some(composed)) = (profile, composed) {
            eprintln!(
                "[compositor] compose={composed:?} stringify={:?} rows={}",
                start.elapsed() - composed,
                patches.len()
            );
        }
        patches
    }

    fn dirty_rows(&self) -> Vec<i32> {
        if self.dirty_all {
            return (0..self.height as i32).collect();
        }
        let mut seen = vec![false; self.height];
        let mut rows = Vec::new();
        for rect in &self.dirty {
            for y in rect.y..rect.y + rect.h {
                if y < 0 || y >= self.height as i32 {
                    continue;
                }
                if !seen[y as usize] {
                    seen[y as usize] = true;
                    rows.push(y);
                }
            }
        }
        rows.sort_unstable();
        rows
    }

    /// Clears the matrix and blends every producer into it, back to front.
    fn compose(&mut self) {
        self.matrix.clear();
        self.dirty.clear();

        // Flatten in layer order, then stable-sort by Z so equal-Z entries
        // keep their registration order within a layer.
        let mut order: Vec<(Layer, usize)> = Vec::new();
        for layer in Layer::ALL {
            if let Some(slot) = self.layers.get(&layer) {
                for index in 0..slot.len() {
                    order.push((layer, index));
                }
            }
        }
        order.sort_by_key(|&(layer, index)| {
            let z = self.layers[&layer][index].z();
            (layer, z, index)
        });
        trace!(contents = order.len(), "composing frame");

        for (layer, index) in order {
            let content = &self.layers[&layer][index];
            let bounds = content.bounds();
            let anchor = content.anchor();
            let (sx, sy) = resolve_position(anchor, bounds, self.width, self.height);
            let glyphs = content.glyphs();

            let mut writes: Vec<(i32, i32, Glyph)> = Vec::new();
            for (row_index, row) in glyphs.iter().enumerate() {
                for (col_index, &top) in row.iter().enumerate() {
                    let tx = sx + col_index as i32;
                    let ty = sy + row_index as i32;
                    if !self.matrix.in_bounds(tx, ty) {
                        continue;
                    }
                    if top.alpha <= 0.0 {
                        continue;
                    }
                    if top.is_empty() {
                        continue;
                    }
                    let bottom = self.matrix.get(tx, ty).unwrap_or_default();
                    writes.push((tx, ty, blend_glyphs(bottom, top)));
                }
            }
            for (tx, ty, glyph) in writes {
                self.matrix.set(tx, ty, glyph);
                self.mark_dirty(tx, ty, 1, 1);
            }
        }
    }

    /// Serializes one row with ANSI SGR sequences, emitting escapes only
    /// when the foreground, background, or style changes, and resetting at
    /// both ends of the line.
    fn stringify_line(&self, y: i32, out: &mut String) {
        out.push_str(RESET);
        let mut state = SgrState::default();
        let mut x = 0_i32;
        while x < self.width as i32 {
            let mut glyph = self.matrix.get(x, y).unwrap_or_default();
            let width = rune_width(glyph.ch);
            if width == 0 {
                // Combining mark: append to the previous cell's output.
                if glyph.ch != '\0' {
                    out.push(glyph.ch);
                    x += 1;
                    continue;
                }
                glyph.ch = ' ';
            }
            state.transition(out, &glyph);
            out.push(glyph.ch);
            // A wide rune covers the following cell too.
            x += if width == 2 { 2 } else { 1 };
        }
        out.push_str(RESET);
    }
}

/// Escape-emission state for one line.
#[derive(Default)]
struct SgrState {
    fg: Rgb,
    bg: Rgb,
    style: StyleFlags,
}

impl SgrState {
    fn transition(&mut self, out: &mut String, glyph: &Glyph) {
        if self.fg == glyph.fg && self.bg == glyph.bg && self.style == glyph.style {
            return;
        }
        // Losing an attribute or a color override requires a full reset
        // before re-applying what remains.
        let style_lost = self.style.bits() & !glyph.style.bits() != 0;
        let fg_lost = !self.fg.is_unset() && glyph.fg.is_unset();
        let bg_lost = !self.bg.is_unset() && glyph.bg.is_unset();
        if style_lost || fg_lost || bg_lost {
            out.push_str(RESET);
            *self = Self::default();
        }
        if self.style != glyph.style {
            for (flag, code) in [
                (StyleFlags::BOLD, 1),
                (StyleFlags::DIM, 2),
                (StyleFlags::ITALIC, 3),
                (StyleFlags::UNDERLINE, 4),
                (StyleFlags::REVERSE, 7),
            ] {
                if glyph.style.has(flag) && !self.style.has(flag) {
                    let _ = write!(out, "\x1b[{code}m");
                }
            }
            self.style = glyph.style;
        }
        if self.fg != glyph.fg {
            if !glyph.fg.is_unset() {
                let _ = write!(out, "\x1b[38;2;{};{};{}m", glyph.fg.r, glyph.fg.g, glyph.fg.b);
            }
            self.fg = glyph.fg;
        }
        if self.bg != glyph.bg {
            if !glyph.bg.is_unset() {
                let _ = write!(out, "\x1b[48;2;{};{};{}m", glyph.bg.r, glyph.bg.g, glyph.bg.b);
            }
            self.bg = glyph.bg;
        }
    }
}

/// Blends a new glyph over the existing cell contents.
///
/// A fully opaque top in `Normal` mode replaces the cell outright; the
/// arithmetic modes still combine with the bottom at full alpha (additive
/// light saturates rather than replaces). The result's alpha is always
/// forced back to 1 so stacked blends never compound.
#[must_use]
pub fn blend_glyphs(bottom: Glyph, top: Glyph) -> Glyph {
    let alpha = top.alpha.min(1.0);
    if alpha >= 1.0 && matches!(top.blend, BlendMode::Normal) {
        let mut result = top;
        result.alpha = 1.0;
        return result;
    }
    if alpha <= 0.0 {
        return bottom;
    }

    let mut result = Glyph {
        alpha: 1.0,
        blend: BlendMode::Normal,
        ..Glyph::default()
    };
    result.ch = select_char(bottom, top, alpha);
    result.fg = blend_colors(bottom.fg, top.fg, alpha, top.blend);
    result.bg = blend_colors(bottom.bg, top.bg, alpha, top.blend);
    result.style = if alpha > 0.5 {
        bottom.style.merge(top.style)
    } else {
        bottom.style
    };
    result
}

/// Picks the new character above the 0.5 alpha threshold, keeping the
/// existing one otherwise, falling back to a space.
fn select_char(bottom: Glyph, top: Glyph, alpha: f64) -> char {
    if alpha > 0.5 && top.ch != '\0' {
        return top.ch;
    }
    if bottom.ch != '\0' {
        return bottom.ch;
    }
    ' '
}

fn blend_colors(bottom: Rgb, top: Rgb, alpha: f64, mode: BlendMode) -> Rgb {
    if top.is_unset() {
        return bottom;
    }
    match mode {
        BlendMode::Normal => {
            if bottom.is_unset() {
                // Nothing underneath: scale the top toward black.
                return Rgb::new(
                    scale(top.r, alpha),
                    scale(top.g, alpha),
                    scale(top.b, alpha),
                );
            }
            Rgb::new(
                lerp(bottom.r, top.r, alpha),
                lerp(bottom.g, top.g, alpha),
                lerp(bottom.b, top.b, alpha),
            )
        }
        BlendMode::Additive => Rgb::new(
            add_clamped(bottom.r, top.r, alpha),
            add_clamped(bottom.g, top.g, alpha),
            add_clamped(bottom.b, top.b, alpha),
        ),
        BlendMode::Multiply => Rgb::new(
            multiply(bottom.r, top.r, alpha),
            multiply(bottom.g, top.g, alpha),
            multiply(bottom.b, top.b, alpha),
        ),
        BlendMode::Screen => Rgb::new(
            screen(bottom.r, top.r, alpha),
            screen(bottom.g, top.g, alpha),
            screen(bottom.b, top.b, alpha),
        ),
    }
}

fn scale(channel: u8, alpha: f64) -> u8 {
    (f64::from(channel) * alpha) as u8
}

fn lerp(bottom: u8, top: u8, alpha: f64) -> u8 {
    (f64::from(bottom) * (1.0 - alpha) + f64::from(top) * alpha) as u8
}

fn add_clamped(bottom: u8, top: u8, alpha: f64) -> u8 {
    let sum = i64::from(bottom) + (f64::from(top) * alpha) as i64;
    sum.min(255) as u8
}

fn multiply(bottom: u8, top: u8, alpha: f64) -> u8 {
    (f64::from(bottom) * (f64::from(top) * alpha / 255.0)) as u8
}

fn screen(bottom: u8, top: u8, alpha: f64) -> u8 {
    let inverse = (255 - i64::from(bottom)) * (255 - (f64::from(top) * alpha) as i64) / 255;
    (255 - inverse) as u8
}

fn profile_start() -> Option<Instant> {
    if std::env::var("VR_PROFILE").as_deref() == Ok("1") {
        Some(Instant::now())
    } else {
        None
    }
}
