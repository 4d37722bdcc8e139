use super::Rgba;
use crate::text::theme;

/// All the configuration and session state for drawing text into a buffer.
/// Layout passes write back into this (line, start-of-line, drawn window, cursor clamp).
#[derive(Debug, Clone, PartialEq)]
pub struct FormatParams {
    pub colour: Rgba,           // Text colour for tokens without their own foreground
    pub select_colour: Rgba,    // Selected text colour
    pub cursor_colour: Rgba,    // Insertion bar colour
    pub highlight_colour: Rgba, // Colour for the "Highlight" style tag
    pub line: usize,            // Lines seen so far, hard and soft breaks
    pub cursor: usize,          // Insertion point, in characters from the start
    pub select_start: usize,    // Selection start (inclusive)
    pub select_end: usize,      // Selection end (exclusive)
    pub start_line_pos: usize,  // First character of the most recent line, soft breaks included
    pub font_size: f32,         // Point size
    pub first_drawn_char_pos: usize, // Everything before this is skipped
    pub last_drawn_char_pos: usize,  // Last character that fit on the screen
    pub tail_buffer: bool,      // Follow the end of the text (log views)
    pub outline: bool,          // Frame each glyph box with the debug border (off by default)
    pub vertical: bool,         // Columns top-to-bottom, right-to-left (CJK)
    pub font: String,           // Font family for most text
    pub cjk_font: String,       // Font family at or above theme::CJK_THRESHOLD
}

impl Default for FormatParams {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParams {
    /// New formatter with useful defaults
    pub fn new() -> Self {
        Self {
            colour: theme::TEXT_COLOUR,
            select_colour: theme::SELECT_COLOUR,
            cursor_colour: theme::CURSOR_COLOUR,
            highlight_colour: theme::HIGHLIGHT_COLOUR,
            line: 0,
            cursor: 0,
            select_start: 0,
            select_end: 0,
            start_line_pos: 0,
            font_size: theme::FONT_SIZE,
            first_drawn_char_pos: 0,
            last_drawn_char_pos: 0,
            tail_buffer: false,
            outline: false,
            vertical: false,
            font: theme::FONT_TEXT.to_string(),
            cjk_font: theme::FONT_CJK.to_string(),
        }
    }

    /// True when there is something selected
    pub fn has_selection(&self) -> bool {
        self.select_start < self.select_end
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.has_selection() && index >= self.select_start && index < self.select_end
    }

    pub fn clear_selection(&mut self) {
        self.select_start = 0;
        self.select_end = 0;
    }

    /// Font family for a code point
    pub fn font_for(&self, ch: char) -> &str {
        if ch as u32 >= theme::CJK_THRESHOLD {
            &self.cjk_font
        } else {
            &self.font
        }
    }

    /// Clamp the cursor and drawn window into `[0, len]`, drop inverted selections
    pub fn sanity_check(&mut self, len: usize) {
        self.cursor = self.cursor.min(len);
        self.first_drawn_char_pos = self.first_drawn_char_pos.min(len);
        if self.select_start > self.select_end || self.select_start > len {
            self.clear_selection();
        } else {
            self.select_end = self.select_end.min(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanity_check_clamps() {
        let mut f = FormatParams::new();
        f.cursor = 50;
        f.first_drawn_char_pos = 70;
        f.sanity_check(10);
        assert_eq!(f.cursor, 10);
        assert_eq!(f.first_drawn_char_pos, 10);

        f.sanity_check(0);
        assert_eq!(f.cursor, 0);
        assert_eq!(f.first_drawn_char_pos, 0);
    }

    #[test]
    fn test_inverted_selection_is_inactive() {
        let mut f = FormatParams::new();
        f.select_start = 5;
        f.select_end = 2;
        assert!(!f.has_selection());
        assert!(!f.is_selected(3));
        f.sanity_check(10);
        assert_eq!((f.select_start, f.select_end), (0, 0));
    }

    #[test]
    fn test_selection_is_half_open() {
        let mut f = FormatParams::new();
        f.select_start = 1;
        f.select_end = 3;
        assert!(!f.is_selected(0));
        assert!(f.is_selected(1));
        assert!(f.is_selected(2));
        assert!(!f.is_selected(3));
    }

    #[test]
    fn test_defaults_have_no_debug_border() {
        let f = FormatParams::new();
        assert!(!f.outline);
        assert_eq!(f.font_size, theme::FONT_SIZE);
    }

    #[test]
    fn test_cjk_font_choice() {
        let f = FormatParams::new();
        assert_eq!(f.font_for('a'), theme::FONT_TEXT);
        assert_eq!(f.font_for('漢'), theme::FONT_CJK);
    }
}
