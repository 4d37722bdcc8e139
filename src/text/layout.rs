//! Paragraph layout engine.
//!
//! One pass walks the token stream once, plus an end-of-text sentinel so a
//! cursor sitting after the last character is still drawn and hittable. For
//! every visited token the pass decides placement, wrapping, cursor and
//! selection, and tracks which token is nearest the pointer. The formatter is
//! the only state that survives a pass.

use super::backend::FontBackend;
use super::compositing::{self, PasteMode};
use super::error::{GlyphError, LayoutError, Result};
use super::fitting::move_in_bounds;
use super::glyph_cache::GlyphCache;
use super::rasterizing::{glyph_size, rasterize_glyph};
use super::{theme, TextContext};
use crate::types::{tokenize, FormatParams, Region, Rgba, Token, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOutcome {
    pub hit_index: usize, // Token nearest the pointer
    pub pen: Vec2,        // Pen position when the pass ended
    pub exhausted: bool,  // Ran out of room before the end of the text
    pub placed: usize,    // Glyphs placed this pass, 0 means nothing fit
}

/// Colour forced onto a token regardless of its style. Selection uses this
/// instead of rewriting the formatter colour for the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOverride {
    pub foreground: Rgba,
}

/// Override, then token style, then formatter colour
pub fn glyph_colour(token: &Token, f: &FormatParams, over: Option<StyleOverride>) -> Rgba {
    over.map(|o| o.foreground)
        .or(token.style.foreground)
        .unwrap_or(f.colour)
}

/// Tokens are hit by their pen position, independent of line height
struct Nearest {
    best: Option<(i64, usize)>,
    pointer: Vec2,
}

impl Nearest {
    // Ties go to the later token
    fn visit(&mut self, anchor: Vec2, index: usize) {
        let d = anchor.distance_sq(self.pointer);
        if self.best.map_or(true, |(best, _)| d <= best) {
            self.best = Some((d, index));
        }
    }

    fn index(&self, fallback: usize) -> usize {
        self.best.map_or(fallback, |(_, index)| index)
    }
}

/// Formatter size must be a usable point size before any backend sees it
fn check_size(size: f32) -> Result<()> {
    if size.is_finite() && size > 0. {
        Ok(())
    } else {
        Err(GlyphError::InvalidSize(size).into())
    }
}

fn cursor_bar(f: &FormatParams, pixels: &mut [u8], width: usize, height: usize, pos: Vec2, extent: i32) {
    let size = if f.vertical {
        Vec2::new(extent, theme::CURSOR_THICKNESS)
    } else {
        Vec2::new(theme::CURSOR_THICKNESS, extent)
    };
    compositing::draw_cursor(pixels, width, height, pos, size, f.cursor_colour);
}

/// Single layout pass. Leaves `f.font_size` wherever the last oversized run put it;
/// [`TextContext::render_token_para`] restores it and sanity checks the formatter.
///
/// When the very first token does not fit, the outcome has `placed == 0` and
/// `exhausted`, and `f.last_drawn_char_pos` is left one before the window
/// (saturating at 0). Check `placed` before trusting it.
pub(crate) fn layout_tokens<B: FontBackend>(
    backend: &mut B,
    cache: &mut GlyphCache,
    f: &mut FormatParams,
    origin: Vec2,
    region: Region,
    pixels: &mut [u8],
    width: usize,
    height: usize,
    pointer: Vec2,
    tokens: &[Token],
    composite: bool,
    show_cursor: bool,
) -> Result<LayoutOutcome> {
    check_size(f.font_size)?;
    if composite {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(LayoutError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        if !region.inside_buffer(width, height) {
            return Err(LayoutError::RegionOutsideCanvas {
                region,
                width,
                height,
            });
        }
    }

    let len = tokens.len();
    let first_drawn = f.first_drawn_char_pos.min(len);
    let entry_size = f.font_size;
    let face_line = backend.face_metrics(entry_size, &f.font).line_height as i32;
    let cursor_visible = show_cursor && composite;

    let mut pen = origin;
    if f.vertical {
        pen.x = region.max.x;
    }
    if let Some(first) = tokens.get(first_drawn) {
        let font = first.first_char().map_or(f.font.as_str(), |ch| f.font_for(ch));
        let dim = glyph_size(backend, cache, &first.text, entry_size, font)?;
        pen = move_in_bounds(pen, region.min, region.max, dim);
    }

    let mut line_height = 0;
    let mut nearest = Nearest {
        best: None,
        pointer,
    };
    let mut placed = 0;

    for i in first_drawn..=len {
        let line_extent = if line_height > 0 { line_height } else { face_line };

        if i == len {
            if cursor_visible && f.cursor == len {
                cursor_bar(f, pixels, width, height, pen, line_extent);
            }
            nearest.visit(pen, i);
            break;
        }

        let token = &tokens[i];

        if token.is_newline() {
            f.font_size = entry_size;
            if cursor_visible && f.cursor == i {
                cursor_bar(f, pixels, width, height, pen, line_extent);
            }
            nearest.visit(pen, i);

            if f.vertical {
                pen.x -= line_extent;
                pen.y = region.min.y;
            } else {
                pen.y += line_extent;
                pen.x = region.min.x;
            }
            line_height = 0;
            f.line += 1;
            f.start_line_pos = i + 1;
            f.last_drawn_char_pos = i;
            continue;
        }

        if token.is_space() {
            f.font_size = entry_size;
        } else if let Some(size) = token.style.font_size {
            f.font_size = size;
        }

        let ch = match token.first_char() {
            Some(ch) => ch,
            None => continue,
        };

        let over = f.is_selected(i).then(|| StyleOverride {
            foreground: f.select_colour,
        });
        let colour = glyph_colour(token, f, over);
        let glyph = rasterize_glyph(backend, cache, &token.text, f.font_size, colour, f.font_for(ch))?;
        let dim = Vec2::new(glyph.bitmap.width as i32, glyph.bitmap.height as i32);

        let stop = |f: &mut FormatParams, pen: Vec2, nearest: &Nearest, why: &str| {
            f.last_drawn_char_pos = i.saturating_sub(1);
            log::debug!("Layout stopped at token {} of {}: {}", i, len, why);
            crate::debug_println!("Layout stopped at {} ({}), pen {:?}", i, why, pen);
            LayoutOutcome {
                hit_index: nearest.index(first_drawn),
                pen,
                exhausted: true,
                placed,
            }
        };

        if f.vertical && pen.x < region.min.x {
            return Ok(stop(f, pen, &nearest, "past the last column"));
        }
        if dim.x > region.width() || dim.y > region.height() {
            return Ok(stop(f, pen, &nearest, "glyph larger than region"));
        }

        // Soft wrap, unless already at the start of a line
        if !f.vertical && pen.x + dim.x > region.max.x && pen.x > region.min.x {
            pen.y += line_extent;
            pen.x = region.min.x;
            line_height = 0;
            f.line += 1;
            f.start_line_pos = i;
        }

        if pen.y + dim.y + 1 > region.max.y || pen.y < region.min.y {
            if !f.vertical {
                return Ok(stop(f, pen, &nearest, "out of lines"));
            }
            let column = if line_height > 0 { line_height } else { face_line };
            pen.x -= column;
            pen.y = region.min.y;
            line_height = 0;
            f.line += 1;
            f.start_line_pos = i;
            if pen.x < region.min.x {
                return Ok(stop(f, pen, &nearest, "out of columns"));
            }
        }

        pen = move_in_bounds(pen, region.min, region.max, dim);
        line_height = line_height.max(glyph.metrics.line_height as i32);

        if composite {
            let glowing;
            let bitmap = match token.style.glow {
                Some(halo) => {
                    glowing = glyph.bitmap.glow(halo, theme::GLOW_RADIUS);
                    &glowing
                }
                None => &glyph.bitmap,
            };
            compositing::paste_bytes(
                &bitmap.pixels,
                bitmap.width,
                bitmap.height,
                pixels,
                width,
                height,
                pen.x,
                pen.y,
                PasteMode::Blend { max_alpha: true },
                f.outline,
            )?;
        }
        if cursor_visible && f.cursor == i {
            cursor_bar(f, pixels, width, height, pen, line_height);
        }

        f.last_drawn_char_pos = i;
        placed += 1;
        nearest.visit(pen, i);

        if f.vertical {
            pen.y += line_height;
        } else {
            pen.x += glyph.metrics.advance.round() as i32;
        }
    }

    Ok(LayoutOutcome {
        hit_index: nearest.index(first_drawn),
        pen,
        exhausted: false,
        placed,
    })
}

impl<B: FontBackend> TextContext<B> {
    /// Lay out `tokens` inside `region` of a `width` x `height` RGBA8 buffer.
    ///
    /// With `composite` off nothing is drawn and the buffer is not touched, which
    /// makes this a pure hit test / measuring pass. Whatever happens, the
    /// formatter leaves with its entry font size and a sane cursor and window.
    pub fn render_token_para(
        &mut self,
        f: &mut FormatParams,
        origin: Vec2,
        region: Region,
        pixels: &mut [u8],
        width: usize,
        height: usize,
        pointer: Vec2,
        tokens: &[Token],
        composite: bool,
        show_cursor: bool,
    ) -> Result<LayoutOutcome> {
        let entry_size = f.font_size;

        let scrolled = match check_size(entry_size) {
            Ok(()) if f.tail_buffer => {
                f.cursor = tokens.len();
                self.scroll_to_cursor(f, origin, region, tokens)
            }
            other => other,
        };
        let result = match scrolled {
            Ok(()) => layout_tokens(
                &mut self.backend,
                &mut self.cache,
                f,
                origin,
                region,
                pixels,
                width,
                height,
                pointer,
                tokens,
                composite,
                show_cursor,
            ),
            Err(err) => Err(err),
        };

        f.font_size = entry_size;
        f.sanity_check(tokens.len());
        result
    }

    /// Plain text form of [`render_token_para`](Self::render_token_para)
    pub fn render_para(
        &mut self,
        f: &mut FormatParams,
        origin: Vec2,
        region: Region,
        pixels: &mut [u8],
        width: usize,
        height: usize,
        pointer: Vec2,
        text: &str,
        composite: bool,
        show_cursor: bool,
    ) -> Result<LayoutOutcome> {
        let tokens = tokenize(text);
        self.render_token_para(
            f, origin, region, pixels, width, height, pointer, &tokens, composite, show_cursor,
        )
    }

    /// Index of the token nearest `pointer`, without drawing or touching `f`
    pub fn hit_test(
        &mut self,
        f: &FormatParams,
        origin: Vec2,
        region: Region,
        pointer: Vec2,
        tokens: &[Token],
    ) -> Result<usize> {
        let mut scratch = f.clone();
        let outcome =
            self.render_token_para(&mut scratch, origin, region, &mut [], 0, 0, pointer, tokens, false, false)?;
        Ok(outcome.hit_index)
    }
}
