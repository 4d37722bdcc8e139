// Global text defaults and constants
// All colours are straight-alpha RGBA (byte order R, G, B, A)

use crate::types::Rgba;

// Formatter colours
pub const TEXT_COLOUR: Rgba = Rgba::new(5, 5, 5, 255); // Near-black body text
pub const SELECT_COLOUR: Rgba = Rgba::new(255, 128, 128, 255); // Selected text (pink)
pub const CURSOR_COLOUR: Rgba = Rgba::new(0, 0, 0, 255); // Insertion bar
pub const HIGHLIGHT_COLOUR: Rgba = Rgba::new(1, 255, 1, 255); // Alternating word highlight (green)

// Code highlighter colours (tag names follow the pygments token names)
pub const STYLE_NAME: &str = "Token.Name";
pub const STYLE_PUNCTUATION: &str = "Token.Punctuation";
pub const STYLE_BUILTIN: &str = "Token.Name.Builtin";
pub const STYLE_HIGHLIGHT: &str = "Highlight";
pub const NAME_COLOUR: Rgba = Rgba::new(1, 255, 1, 255);
pub const PUNCTUATION_COLOUR: Rgba = Rgba::new(255, 1, 1, 255);
pub const BUILTIN_COLOUR: Rgba = Rgba::new(1, 1, 255, 255);

// Font families and sizes
pub const FONT_TEXT: &str = "Open Sans";
pub const FONT_CJK: &str = "Noto Sans CJK SC";
pub const CJK_THRESHOLD: u32 = 0x2E80; // First CJK radical, everything above uses FONT_CJK
pub const FONT_SIZE: f32 = 22.;
pub const LINE_HEIGHT_RATIO: f32 = 1.2; // Face line height relative to point size

// Glyph bitmap geometry
pub const GLYPH_WIDTH_MARGIN: i32 = 2; // Bitmap width = measured width * 2
pub const GLYPH_HEIGHT_MARGIN: i32 = 3; // Bitmap height = point size * 3
pub const BASELINE_DIVISOR: i32 = 3; // Baseline sits at height / 3
pub const MAX_GLYPH_DIMENSION: i32 = 4000; // Anything bigger is a bad point size

// Cursor and editing
pub const CURSOR_THICKNESS: i32 = 3;
pub const TAB_EXPANSION: &str = "    ";

// Debug border (only R and A are forced, G/B keep the glyph colour)
pub const BORDER_RED: u8 = 255;

// Glow halo around tokens with a glow colour
pub const GLOW_RADIUS: usize = 1;
