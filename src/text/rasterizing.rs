use std::sync::Arc;

use super::backend::FontBackend;
use super::bitmap::GlyphBitmap;
use super::error::GlyphError;
use super::glyph_cache::{GlyphCache, GlyphKey, GlyphMetrics, RasterizedGlyph};
use super::theme;
use crate::types::{Rgba, Vec2};

/// Rasterize `text` at `size` in `colour`, going through the cache.
///
/// The bitmap is twice the measured width and three times the point size so
/// decorative ink past the metrics is not clipped. The pen starts at
/// |left bearing| with the baseline a third of the way down. Metrics come from
/// the first code point; multi code point tokens advance by their measured width.
pub fn rasterize_glyph<B: FontBackend>(
    backend: &mut B,
    cache: &mut GlyphCache,
    text: &str,
    size: f32,
    colour: Rgba,
    font: &str,
) -> Result<Arc<RasterizedGlyph>, GlyphError> {
    if !size.is_finite() || size <= 0. {
        return Err(GlyphError::InvalidSize(size));
    }

    let key = GlyphKey::new(text, size, colour, font);
    if let Some(glyph) = cache.get(&key) {
        return Ok(glyph);
    }

    let measured = backend.measure_string(text, size, font);
    let width = theme::GLYPH_WIDTH_MARGIN as f32 * measured.ceil();
    let height = theme::GLYPH_HEIGHT_MARGIN as f32 * size.trunc();

    // WHY: A bad point size (unit mixup, corrupt style) asks for a giant allocation
    // PROOF: 4000 px is well past any legible glyph at texture scale
    // PREVENTS: Multi-gigabyte bitmaps per token
    if width > theme::MAX_GLYPH_DIMENSION as f32 || height > theme::MAX_GLYPH_DIMENSION as f32 {
        log::warn!(
            "Refusing {:?} at size {}: bitmap would be {}x{}",
            text,
            size,
            width,
            height
        );
        return Err(GlyphError::TooLarge {
            text: text.to_string(),
            width: width as i32,
            height: height as i32,
            limit: theme::MAX_GLYPH_DIMENSION,
        });
    }
    let (width, height) = (width as i32, height as i32);

    let first = text.chars().next();
    let left_bearing = first
        .and_then(|ch| backend.glyph_bounds(ch, size, font))
        .map_or(0., |bounds| bounds.min_x);
    let advance = match (first, text.chars().nth(1)) {
        (Some(ch), None) => backend.glyph_advance(ch, size, font),
        _ => measured,
    };
    let line_height = backend.face_metrics(size, font).line_height;

    let mut bitmap = GlyphBitmap::new(width as usize, height as usize);
    let dot = Vec2::new(
        left_bearing.abs().round() as i32,
        height / theme::BASELINE_DIVISOR,
    );
    backend.draw_string(text, size, font, colour, dot, &mut bitmap);

    log::debug!(
        "Glyph cache miss: {:?} size {} font {:?} -> {}x{}",
        text,
        size,
        font,
        width,
        height
    );

    Ok(cache.insert(
        key,
        RasterizedGlyph {
            bitmap,
            metrics: GlyphMetrics {
                advance,
                line_height,
                left_bearing,
            },
        },
    ))
}

/// Bitmap dimensions of the first code point of `text`
pub fn glyph_size<B: FontBackend>(
    backend: &mut B,
    cache: &mut GlyphCache,
    text: &str,
    size: f32,
    font: &str,
) -> Result<Vec2, GlyphError> {
    let first = match text.chars().next() {
        Some(ch) => ch,
        None => return Ok(Vec2::ZERO),
    };
    let mut utf8 = [0u8; 4];
    let glyph = rasterize_glyph(backend, cache, first.encode_utf8(&mut utf8), size, Rgba::WHITE, font)?;
    Ok(Vec2::new(glyph.bitmap.width as i32, glyph.bitmap.height as i32))
}
