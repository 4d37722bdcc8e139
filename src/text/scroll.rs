//! Follow-the-cursor scrolling.
//!
//! Scrolling only moves `first_drawn_char_pos`; every trial is a measure-only
//! layout pass on a copy of the formatter, so nothing is drawn and line state
//! in the caller's formatter is untouched.

use super::backend::FontBackend;
use super::error::Result;
use super::layout::layout_tokens;
use super::TextContext;
use crate::types::{FormatParams, Region, Token, Vec2};

impl<B: FontBackend> TextContext<B> {
    /// Move the drawn window so the cursor falls inside it.
    ///
    /// Cursor above the window: the window starts at the cursor's line.
    /// Cursor below it: the window moves forward by however far the cursor
    /// sat past the last drawn character, until a trial pass reaches it.
    pub fn scroll_to_cursor(
        &mut self,
        f: &mut FormatParams,
        origin: Vec2,
        region: Region,
        tokens: &[Token],
    ) -> Result<()> {
        let len = tokens.len();
        let cursor = f.cursor.min(len);
        f.first_drawn_char_pos = f.first_drawn_char_pos.min(len);

        if cursor < f.first_drawn_char_pos {
            f.first_drawn_char_pos = tokens[..cursor]
                .iter()
                .rposition(Token::is_newline)
                .map_or(0, |newline| newline + 1);
            return Ok(());
        }

        loop {
            let mut trial = f.clone();
            let outcome = layout_tokens(
                &mut self.backend,
                &mut self.cache,
                &mut trial,
                origin,
                region,
                &mut [],
                0,
                0,
                Vec2::ZERO,
                tokens,
                false,
                false,
            )?;

            if !outcome.exhausted {
                return Ok(());
            }
            // last_drawn_char_pos only names a drawn glyph when something was placed
            if outcome.placed == 0 {
                log::debug!("Cannot scroll to {}: nothing fits in {:?}", cursor, region);
                return Ok(());
            }
            if cursor <= trial.last_drawn_char_pos {
                return Ok(());
            }

            let behind = cursor.saturating_sub(trial.last_drawn_char_pos).max(1);
            f.first_drawn_char_pos = (f.first_drawn_char_pos + behind).min(cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::backend::BoxBackend;
    use crate::types::tokenize;

    fn formatter() -> FormatParams {
        let mut f = FormatParams::new();
        f.font_size = 10.;
        f
    }

    // Two lines of three 10px boxes at 5px pitch
    const REGION: Region = Region::new(0, 0, 22, 43);

    #[test]
    fn test_visible_cursor_does_not_scroll() {
        let mut ctx = TextContext::new(BoxBackend::new());
        let mut f = formatter();
        f.cursor = 2;
        ctx.scroll_to_cursor(&mut f, Vec2::ZERO, REGION, &tokenize("abcdefgh")).unwrap();
        assert_eq!(f.first_drawn_char_pos, 0);
    }

    #[test]
    fn test_cursor_past_window_scrolls_forward() {
        let mut ctx = TextContext::new(BoxBackend::new());
        let mut f = formatter();
        let tokens = tokenize("abcdefghijklmnop");
        f.cursor = 13;

        ctx.scroll_to_cursor(&mut f, Vec2::ZERO, REGION, &tokens).unwrap();

        assert!(f.first_drawn_char_pos > 0);
        assert!(f.first_drawn_char_pos <= 13);
        let mut trial = f.clone();
        ctx.render_token_para(&mut trial, Vec2::ZERO, REGION, &mut [], 0, 0, Vec2::ZERO, &tokens, false, false)
            .unwrap();
        assert!(trial.last_drawn_char_pos >= 13);
    }

    #[test]
    fn test_nothing_fits_leaves_window_alone() {
        let mut ctx = TextContext::new(BoxBackend::new());
        let mut f = formatter();
        f.first_drawn_char_pos = 1;
        f.cursor = 3;
        ctx.scroll_to_cursor(&mut f, Vec2::ZERO, Region::new(0, 0, 8, 20), &tokenize("abcd")).unwrap();
        assert_eq!(f.first_drawn_char_pos, 1);
    }

    #[test]
    fn test_cursor_above_window_scrolls_back_to_its_line() {
        let mut ctx = TextContext::new(BoxBackend::new());
        let mut f = formatter();
        f.first_drawn_char_pos = 6;
        f.cursor = 4;
        ctx.scroll_to_cursor(&mut f, Vec2::ZERO, REGION, &tokenize("ab\ncdefgh")).unwrap();
        assert_eq!(f.first_drawn_char_pos, 3);
    }
}
