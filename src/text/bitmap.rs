//! Owned RGBA8 glyph images.
//!
//! Backends draw into a fresh transparent [`GlyphBitmap`]; once it lands in the
//! glyph cache it is shared behind an `Arc` and never written again. Effects
//! such as [`GlyphBitmap::glow`] return a derived copy instead.

use super::compositing::blend_pixel;
use crate::types::Rgba;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>, // [RGBA], straight alpha, row-major
}

impl GlyphBitmap {
    /// Fully transparent bitmap
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    pub fn get(&self, x: usize, y: usize) -> Rgba {
        Rgba::from_pixel(&self.pixels, self.offset(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, colour: Rgba) {
        let offset = self.offset(x, y);
        self.pixels[offset..offset + 4].copy_from_slice(&colour.0);
    }

    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.pixels[self.offset(x, y) + 3]
    }

    /// Number of pixels with any coverage
    pub fn inked_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] > 0).count()
    }

    /// Write `colour` at `coverage`, keeping whichever of old/new is more opaque.
    /// Coordinates outside the bitmap are dropped (ink past the margin is clipped).
    pub fn plot(&mut self, x: i32, y: i32, colour: Rgba, coverage: u8) {
        self.plot_rgba(x, y, colour.with_coverage(coverage));
    }

    pub fn plot_rgba(&mut self, x: i32, y: i32, colour: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if colour.a() > self.alpha(x, y) {
            self.set(x, y, colour);
        }
    }

    /// Derived copy with a `radius` pixel halo in `colour` under the glyph
    pub fn glow(&self, colour: Rgba, radius: usize) -> GlyphBitmap {
        let mut out = GlyphBitmap::new(self.width, self.height);

        for y in 0..self.height {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(self.height - 1);
            for x in 0..self.width {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(self.width - 1);

                let mut halo = 0u8;
                for yy in y0..=y1 {
                    for xx in x0..=x1 {
                        halo = halo.max(self.alpha(xx, yy));
                    }
                }

                let under = if halo > 0 {
                    colour.with_coverage(halo)
                } else {
                    Rgba::TRANSPARENT
                };
                out.set(x, y, blend_pixel(self.get(x, y), under, true));
            }
        }

        out
    }
}
