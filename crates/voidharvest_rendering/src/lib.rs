//! # Voidharvest Rendering
//!
//! Layered compositor for a terminal-rendered game world:
//!
//! - **Content model**: producers declare a layer, Z, anchor, bounds, and
//!   a glyph matrix; the compositor polls them each frame
//! - **Composition**: back-to-front layers, stable Z sort within each
//!   layer, per-cell alpha blending with normal/additive/multiply/screen
//!   modes
//! - **Output**: ANSI SGR styled strings with change-only escapes, wide
//!   rune and combining mark awareness, and per-row dirty patches for
//!   incremental repaint
//!
//! `render()` is the full-grid path for tests and initial paint;
//! `render_patch()` is the intended real-time path.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod compositor;
mod content;
mod frame;
mod glyph;
mod matrix;
mod wcwidth;

pub use compositor::{blend_glyphs, Compositor, LinePatch, Rect};
pub use content::{
    resolve_position, Anchor, Bounds, HAlign, Layer, Renderable, VAlign, Z_BACKGROUND, Z_CONTENT,
    Z_FRAME, Z_OVERLAY,
};
pub use frame::{GlyphPanel, TvFrame};
pub use glyph::{BlendMode, Glyph, Rgb, StyleFlags};
pub use matrix::GlyphMatrix;
pub use wcwidth::rune_width;
