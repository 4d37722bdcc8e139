//! Pasting glyph bitmaps into RGBA8 texture buffers.
//!
//! All buffers are tightly packed `[R, G, B, A]` rows, origin top-left, the
//! layout the texture upload expects.

use rayon::prelude::*;

use super::error::CompositeError;
use super::theme;
use crate::types::{Rgba, Vec2};

/// How source pixels land on the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteMode {
    /// Straight row copy, destination pixels are replaced
    Opaque,
    /// Alpha "over" blend. `max_alpha` keeps the larger of the two alphas instead of the
    /// blended one, so a later glyph box overlapping an earlier glyph cannot thin its edges.
    Blend { max_alpha: bool },
}

/// Source-over for one pixel, straight alpha in and out
#[inline]
pub fn blend_pixel(src: Rgba, dst: Rgba, max_alpha: bool) -> Rgba {
    let sa = src.a() as f32 / 255.;
    let da = dst.a() as f32 / 255.;
    let out_a = sa + da * (1. - sa);

    // WHY: Two fully transparent pixels have no colour to average
    // PROOF: out_a == 0 only when sa == 0 and da == 0
    // PREVENTS: Division by zero producing NaN channels
    if out_a <= 0. {
        return Rgba::TRANSPARENT;
    }

    let channel = |s: u8, d: u8| -> u8 {
        let c = (s as f32 * sa + d as f32 * da * (1. - sa)) / out_a;
        c.round().clamp(0., 255.) as u8
    };

    let alpha = if max_alpha {
        src.a().max(dst.a())
    } else {
        (out_a * 255.).round().clamp(0., 255.) as u8
    };

    Rgba::new(
        channel(src.r(), dst.r()),
        channel(src.g(), dst.g()),
        channel(src.b(), dst.b()),
        alpha,
    )
}

fn check_len(buf: &[u8], width: usize, height: usize) -> Result<(), CompositeError> {
    let expected = width * height * 4;
    if buf.len() != expected {
        return Err(CompositeError::BufferSize {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Copy or blend a `src_w` x `src_h` bitmap into `dst` with its top-left at (`x`, `y`).
///
/// The rectangle must lie fully inside the destination; the layout engine is responsible
/// for that, so a violation is reported and nothing is written.
/// `show_border` frames the pasted rectangle in red for debugging glyph boxes.
pub fn paste_bytes(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst: &mut [u8],
    dst_w: usize,
    dst_h: usize,
    x: i32,
    y: i32,
    mode: PasteMode,
    show_border: bool,
) -> Result<(), CompositeError> {
    check_len(src, src_w, src_h)?;
    check_len(dst, dst_w, dst_h)?;

    if x < 0
        || y < 0
        || x as usize + src_w > dst_w
        || y as usize + src_h > dst_h
    {
        return Err(CompositeError::OutOfBounds {
            src_w,
            src_h,
            dst_w,
            dst_h,
            x,
            y,
        });
    }

    let (x, y) = (x as usize, y as usize);
    let row_bytes = src_w * 4;

    for row in 0..src_h {
        let src_row = &src[row * row_bytes..(row + 1) * row_bytes];
        let dst_start = ((y + row) * dst_w + x) * 4;
        let dst_row = &mut dst[dst_start..dst_start + row_bytes];

        match mode {
            PasteMode::Opaque => dst_row.copy_from_slice(src_row),
            PasteMode::Blend { max_alpha } => {
                for (s, d) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(4)) {
                    let out = blend_pixel(
                        Rgba([s[0], s[1], s[2], s[3]]),
                        Rgba([d[0], d[1], d[2], d[3]]),
                        max_alpha,
                    );
                    d.copy_from_slice(&out.0);
                }
            }
        }

        if show_border {
            let edge_row = row == 0 || row == src_h - 1;
            for col in 0..src_w {
                if edge_row || col == 0 || col == src_w - 1 {
                    let px = &mut dst_row[col * 4..col * 4 + 4];
                    px[0] = theme::BORDER_RED;
                    px[3] = 255;
                }
            }
        }
    }

    Ok(())
}

/// Fill a whole buffer with one colour (clearing the canvas before a frame)
pub fn fill(pixels: &mut [u8], width: usize, colour: Rgba) {
    if width == 0 || pixels.is_empty() {
        return;
    }
    pixels.par_chunks_mut(width * 4).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&colour.0);
        }
    });
}

/// Solid bar for the insertion cursor, clipped to the buffer
pub fn draw_cursor(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    pos: Vec2,
    size: Vec2,
    colour: Rgba,
) {
    let x0 = pos.x.max(0) as usize;
    let y0 = pos.y.max(0) as usize;
    let x1 = (pos.x as i64 + size.x as i64).clamp(0, width as i64) as usize;
    let y1 = (pos.y as i64 + size.y as i64).clamp(0, height as i64) as usize;

    for yy in y0..y1 {
        for xx in x0..x1 {
            let offset = (yy * width + xx) * 4;
            if offset + 4 <= pixels.len() {
                pixels[offset..offset + 4].copy_from_slice(&colour.0);
            }
        }
    }
}
