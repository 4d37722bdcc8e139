//! Text rasterization, layout and compositing into RGBA8 pixel buffers.

pub mod backend;
pub mod bitmap;
pub mod compositing;
pub mod cosmic_backend;
pub mod error;
pub mod fitting;
pub mod glyph_cache;
pub mod layout;
pub mod rasterizing;
pub mod scroll;
pub mod theme;

use std::sync::Arc;

pub use backend::{BoxBackend, FaceMetrics, FontBackend, GlyphBounds};
pub use bitmap::GlyphBitmap;
pub use compositing::{blend_pixel, draw_cursor, fill, paste_bytes, PasteMode};
pub use cosmic_backend::CosmicBackend;
pub use error::{CompositeError, GlyphError, LayoutError, Result};
pub use fitting::{in_bounds, move_in_bounds};
pub use glyph_cache::{GlyphCache, GlyphKey, GlyphMetrics, RasterizedGlyph};
pub use layout::{LayoutOutcome, StyleOverride};

use crate::types::{Rgba, Vec2};

/// One document view: a font backend plus the glyph cache that belongs to it.
///
/// Views never share a cache; two documents rendering in parallel each own a
/// `TextContext`.
pub struct TextContext<B: FontBackend = CosmicBackend> {
    backend: B,
    cache: GlyphCache,
}

impl TextContext<CosmicBackend> {
    /// Context over the system fonts
    pub fn cosmic() -> Self {
        Self::new(CosmicBackend::new())
    }
}

impl<B: FontBackend> TextContext<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: GlyphCache::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Cached bitmap and metrics for `text`
    pub fn rasterize(
        &mut self,
        text: &str,
        size: f32,
        colour: Rgba,
        font: &str,
    ) -> Result<Arc<RasterizedGlyph>> {
        Ok(rasterizing::rasterize_glyph(
            &mut self.backend,
            &mut self.cache,
            text,
            size,
            colour,
            font,
        )?)
    }

    /// Bitmap dimensions of the first code point of `text`
    pub fn glyph_size(&mut self, text: &str, size: f32, font: &str) -> Result<Vec2> {
        Ok(rasterizing::glyph_size(
            &mut self.backend,
            &mut self.cache,
            text,
            size,
            font,
        )?)
    }
}
