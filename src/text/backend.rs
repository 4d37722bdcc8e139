//! Font backend seam.
//!
//! The rasterizer only needs five queries from a font: ink bounds, advance,
//! line height, string width and drawing into a bitmap. [`CosmicBackend`]
//! answers them with real fonts; [`BoxBackend`] answers them with fixed
//! geometry so layouts can run headless and deterministically.
//!
//! [`CosmicBackend`]: super::cosmic_backend::CosmicBackend

use super::bitmap::GlyphBitmap;
use super::theme;
use crate::types::{Rgba, Vec2};

/// Ink box of one glyph relative to the pen on the baseline, y grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub line_height: f32,
}

pub trait FontBackend {
    /// Ink bounds of `ch`, `None` for glyphs without ink (spaces)
    fn glyph_bounds(&mut self, ch: char, size: f32, font: &str) -> Option<GlyphBounds>;

    fn glyph_advance(&mut self, ch: char, size: f32, font: &str) -> f32;

    fn face_metrics(&mut self, size: f32, font: &str) -> FaceMetrics;

    /// Advance width of the whole string
    fn measure_string(&mut self, text: &str, size: f32, font: &str) -> f32;

    /// Draw `text` with the pen starting at `dot` (x on the pen, y on the baseline)
    fn draw_string(
        &mut self,
        text: &str,
        size: f32,
        font: &str,
        colour: Rgba,
        dot: Vec2,
        dst: &mut GlyphBitmap,
    );
}

/// Synthetic monospace font: every inked glyph is a solid box.
///
/// Narrow glyphs advance `size / 2`, glyphs at or above the CJK threshold advance `size`.
/// Ink spans one pixel in from each side of the advance and `0.7 * size` above the
/// baseline. Counts draw calls so cache behaviour can be observed.
#[derive(Debug, Clone, Default)]
pub struct BoxBackend {
    draws: usize,
}

impl BoxBackend {
    pub const ASCENT_RATIO: f32 = 0.7;

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `draw_string` calls so far
    pub fn draw_calls(&self) -> usize {
        self.draws
    }

    fn advance(ch: char, size: f32) -> f32 {
        if ch as u32 >= theme::CJK_THRESHOLD {
            size
        } else {
            size / 2.
        }
    }
}

impl FontBackend for BoxBackend {
    fn glyph_bounds(&mut self, ch: char, size: f32, _font: &str) -> Option<GlyphBounds> {
        if ch.is_whitespace() {
            return None;
        }
        Some(GlyphBounds {
            min_x: 1.,
            min_y: -(size * Self::ASCENT_RATIO).round(),
            max_x: Self::advance(ch, size) - 1.,
            max_y: 0.,
        })
    }

    fn glyph_advance(&mut self, ch: char, size: f32, _font: &str) -> f32 {
        Self::advance(ch, size)
    }

    fn face_metrics(&mut self, size: f32, _font: &str) -> FaceMetrics {
        FaceMetrics {
            line_height: size * theme::LINE_HEIGHT_RATIO,
        }
    }

    fn measure_string(&mut self, text: &str, size: f32, _font: &str) -> f32 {
        text.chars().map(|ch| Self::advance(ch, size)).sum()
    }

    fn draw_string(
        &mut self,
        text: &str,
        size: f32,
        font: &str,
        colour: Rgba,
        dot: Vec2,
        dst: &mut GlyphBitmap,
    ) {
        self.draws += 1;

        let mut pen_x = dot.x as f32;
        for ch in text.chars() {
            if let Some(bounds) = self.glyph_bounds(ch, size, font) {
                let x0 = (pen_x + bounds.min_x).round() as i32;
                let x1 = (pen_x + bounds.max_x).round() as i32;
                let y0 = dot.y + bounds.min_y as i32;
                let y1 = dot.y + bounds.max_y as i32;
                for y in y0..y1 {
                    for x in x0..x1 {
                        dst.plot(x, y, colour, 255);
                    }
                }
            }
            pen_x += Self::advance(ch, size);
        }
    }
}
