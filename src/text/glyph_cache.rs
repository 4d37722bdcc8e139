//! Memoized glyph bitmaps.
//!
//! Owned by one [`TextContext`](super::TextContext), never global. Entries are
//! immutable once inserted and handed out as `Arc`, so a hit is a refcount bump
//! and two identical requests get pointer-identical results.

use std::collections::HashMap;
use std::sync::Arc;

use super::bitmap::GlyphBitmap;
use crate::types::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub advance: f32,      // Pen advance after this token
    pub line_height: f32,  // Face line height at this size
    pub left_bearing: f32, // Ink offset from the pen, the bitmap is shifted by |left_bearing|
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub bitmap: GlyphBitmap,
    pub metrics: GlyphMetrics,
}

/// Everything that changes the pixels of a rasterized token.
/// Size is keyed by its bit pattern so 12.0 and 12.000001 are different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    size_bits: u32,
    colour: Rgba,
    text: String,
    font: String,
}

impl GlyphKey {
    pub fn new(text: &str, size: f32, colour: Rgba, font: &str) -> Self {
        Self {
            size_bits: size.to_bits(),
            colour,
            text: text.to_string(),
            font: font.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct GlyphCache {
    glyphs: HashMap<GlyphKey, Arc<RasterizedGlyph>>,
    hits: u64,
    misses: u64,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a glyph, counting the hit or miss
    pub fn get(&mut self, key: &GlyphKey) -> Option<Arc<RasterizedGlyph>> {
        match self.glyphs.get(key) {
            Some(glyph) => {
                self.hits += 1;
                Some(Arc::clone(glyph))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: GlyphKey, glyph: RasterizedGlyph) -> Arc<RasterizedGlyph> {
        let glyph = Arc::new(glyph);
        self.glyphs.insert(key, Arc::clone(&glyph));
        glyph
    }

    pub fn contains(&self, key: &GlyphKey) -> bool {
        self.glyphs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every entry. Bitmaps still held by callers stay alive until released.
    pub fn clear(&mut self) {
        crate::log(&format!("Glyph cache cleared ({} entries)", self.glyphs.len()));
        self.glyphs.clear();
    }
}
