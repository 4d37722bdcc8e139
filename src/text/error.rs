use thiserror::Error;

use crate::types::Region;

/// Rasterizer failures. Both are caller bugs (bad point size), not recoverable states.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GlyphError {
    #[error("Invalid point size {0}")]
    InvalidSize(f32),

    #[error("Glyph bitmap for {text:?} would be {width}x{height}, limit is {limit}")]
    TooLarge {
        text: String,
        width: i32,
        height: i32,
        limit: i32,
    },
}

/// Compositor contract violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositeError {
    #[error("Source {src_w}x{src_h} at ({x}, {y}) does not fit in destination {dst_w}x{dst_h}")]
    OutOfBounds {
        src_w: usize,
        src_h: usize,
        dst_w: usize,
        dst_h: usize,
        x: i32,
        y: i32,
    },

    #[error("Buffer holds {actual} bytes, expected {expected} for its dimensions")]
    BufferSize { expected: usize, actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    Glyph(#[from] GlyphError),

    #[error(transparent)]
    Composite(#[from] CompositeError),

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for its dimensions")]
    BufferSize { expected: usize, actual: usize },

    #[error("Region {region:?} lies outside the {width}x{height} canvas")]
    RegionOutsideCanvas {
        region: Region,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
