use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, SwashContent,
    SwashImage,
};

use super::backend::{FaceMetrics, FontBackend, GlyphBounds};
use super::bitmap::GlyphBitmap;
use super::theme;
use crate::types::{Rgba, Vec2};

/// Real fonts through cosmic-text: system fonts plus anything loaded with
/// [`CosmicBackend::load_font_data`], rasterized by swash.
pub struct CosmicBackend {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl CosmicBackend {
    /// Backend over the system font database
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Register an in-memory font file (TTF/OTF) so it can be picked by family name
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_system.db_mut().load_font_data(data);
    }

    pub fn font_system_mut(&mut self) -> &mut FontSystem {
        &mut self.font_system
    }

    /// Shape one unwrapped line of `text`. None for sizes cosmic-text cannot
    /// build metrics from (zero, negative, NaN, infinite).
    fn shape(&mut self, text: &str, size: f32, font: &str) -> Option<Buffer> {
        if !size.is_finite() || size <= 0. {
            log::warn!("Refusing to shape {:?} at size {}", text, size);
            return None;
        }
        let attrs = Attrs::new().family(Family::Name(font));
        let metrics = Metrics::relative(size, theme::LINE_HEIGHT_RATIO);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        Some(buffer)
    }

    /// Rasterize every glyph of a shaped buffer, pen at `(pen_x, baseline)`.
    /// `each` gets the image's top-left in the same space plus the swash image.
    fn for_each_image(
        &mut self,
        buffer: &Buffer,
        pen_x: f32,
        baseline: f32,
        mut each: impl FnMut(i32, i32, &SwashImage),
    ) {
        for run in buffer.layout_runs() {
            for glyph in run.glyphs {
                let physical_glyph = glyph.physical((pen_x, baseline - run.line_y), 1.);

                if let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical_glyph.cache_key)
                {
                    let glyph_x = physical_glyph.x + image.placement.left;
                    let glyph_y = physical_glyph.y + run.line_y as i32 - image.placement.top;
                    each(glyph_x, glyph_y, image);
                }
            }
        }
    }
}

impl Default for CosmicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBackend for CosmicBackend {
    fn glyph_bounds(&mut self, ch: char, size: f32, font: &str) -> Option<GlyphBounds> {
        let mut utf8 = [0u8; 4];
        let buffer = self.shape(ch.encode_utf8(&mut utf8), size, font)?;

        let mut bounds: Option<GlyphBounds> = None;
        self.for_each_image(&buffer, 0., 0., |x, y, image| {
            let (w, h) = (image.placement.width as f32, image.placement.height as f32);
            if w == 0. || h == 0. {
                return;
            }
            let (x, y) = (x as f32, y as f32);
            bounds = Some(match bounds {
                None => GlyphBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x + w,
                    max_y: y + h,
                },
                Some(b) => GlyphBounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x + w),
                    max_y: b.max_y.max(y + h),
                },
            });
        });
        bounds
    }

    fn glyph_advance(&mut self, ch: char, size: f32, font: &str) -> f32 {
        let mut utf8 = [0u8; 4];
        self.measure_string(ch.encode_utf8(&mut utf8), size, font)
    }

    fn face_metrics(&mut self, size: f32, font: &str) -> FaceMetrics {
        let line_height = match self.shape(" ", size, font) {
            Some(buffer) => buffer
                .layout_runs()
                .next()
                .map(|run| run.line_height)
                .unwrap_or(size * theme::LINE_HEIGHT_RATIO),
            None => 0.,
        };
        FaceMetrics { line_height }
    }

    fn measure_string(&mut self, text: &str, size: f32, font: &str) -> f32 {
        match self.shape(text, size, font) {
            Some(buffer) => buffer
                .layout_runs()
                .fold(0.0, |max_width: f32, run| max_width.max(run.line_w)),
            None => 0.,
        }
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
        let buffer = match self.shape(text, size, font) {
            Some(buffer) => buffer,
            None => return,
        };

        self.for_each_image(&buffer, dot.x as f32, dot.y as f32, |glyph_x, glyph_y, image| {
            let glyph_width = image.placement.width as usize;
            let glyph_height = image.placement.height as usize;

            for cy in 0..glyph_height {
                for cx in 0..glyph_width {
                    let i = cy * glyph_width + cx;
                    let (x, y) = (glyph_x + cx as i32, glyph_y + cy as i32);
                    match image.content {
                        SwashContent::Mask => {
                            let alpha = image.data[i];
                            if alpha > 0 {
                                dst.plot(x, y, colour, alpha);
                            }
                        }
                        // Emoji and other colour glyphs keep their own colours
                        SwashContent::Color => {
                            let px = &image.data[i * 4..i * 4 + 4];
                            if px[3] > 0 {
                                dst.plot_rgba(x, y, Rgba([px[0], px[1], px[2], px[3]]));
                            }
                        }
                        SwashContent::SubpixelMask => {
                            let px = &image.data[i * 4..i * 4 + 4];
                            let alpha = px[0].max(px[1]).max(px[2]);
                            if alpha > 0 {
                                dst.plot(x, y, colour, alpha);
                            }
                        }
                    }
                }
            }
        });
    }
}
