//! Paragraph layout scenarios against the synthetic box font
//!
//! BoxBackend geometry at size 10: 5px advance, 10x30 glyph bitmaps with the
//! baseline at y=10, ink in columns 2..5 and rows 3..10, 12px line height.

use glyphpaste::text::theme;
use glyphpaste::{
    tokenize, tokens_from_markup, BoxBackend, FormatParams, Region, Rgba, StyleTable, TextContext,
    Token, TokenStyle, Vec2,
};

fn context() -> TextContext<BoxBackend> {
    TextContext::new(BoxBackend::new())
}

fn formatter(size: f32) -> FormatParams {
    let mut f = FormatParams::new();
    f.font_size = size;
    f.outline = false;
    f
}

fn pixel(pixels: &[u8], width: usize, x: usize, y: usize) -> Rgba {
    Rgba::from_pixel(pixels, (y * width + x) * 4)
}

/// Pen where token `i` will be placed: the end pen of a measure pass over `tokens[..i]`
fn pen_before(ctx: &mut TextContext<BoxBackend>, f: &FormatParams, region: Region, tokens: &[Token], i: usize) -> Vec2 {
    let mut scratch = f.clone();
    ctx.render_token_para(&mut scratch, Vec2::ZERO, region, &mut [], 0, 0, Vec2::ZERO, &tokens[..i], false, false)
        .unwrap()
        .pen
}

#[test]
fn test_newline_then_hit_on_next_line() {
    let (w, h) = (200, 100);
    let region = Region::new(0, 0, 200, 100);
    let mut ctx = context();
    let mut f = formatter(12.);
    f.cursor = 3;
    let mut pixels = vec![0; w * h * 4];
    let tokens = tokenize("Hi\nthere");

    ctx.render_token_para(&mut f, Vec2::ZERO, region, &mut pixels, w, h, Vec2::ZERO, &tokens, true, true)
        .unwrap();

    assert_eq!(f.line, 1);
    assert_eq!(f.start_line_pos, 3);

    let t_pen = pen_before(&mut ctx, &f, region, &tokens, 3);
    assert_eq!(t_pen.x, 0);
    assert!(t_pen.y > 0);
    assert_eq!(ctx.hit_test(&f, Vec2::ZERO, region, t_pen, &tokens).unwrap(), 3);
}

#[test]
fn test_running_out_of_lines_stops_before_the_overflowing_glyph() {
    let (w, h) = (16, 31);
    let mut ctx = context();
    let mut f = formatter(10.);
    let mut pixels = vec![0; w * h * 4];

    let out = ctx
        .render_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, "abc", true, false)
        .unwrap();

    assert!(out.exhausted);
    assert_eq!(out.placed, 2);
    assert_eq!(f.last_drawn_char_pos, 1);
    // "c" would have wrapped to y=12, its ink rows 15..22 stay empty
    assert_eq!(pixel(&pixels, w, 2, 17), Rgba::TRANSPARENT);
    assert_eq!(pixel(&pixels, w, 2, 5), f.colour);
}

#[test]
fn test_selection_recolours_only_selected_range() {
    let (w, h) = (60, 40);
    let mut ctx = context();
    let mut f = formatter(10.);
    f.select_start = 1;
    f.select_end = 3;
    let mut pixels = vec![0; w * h * 4];

    ctx.render_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, "abcd", true, false)
        .unwrap();

    let ink = |i: usize| pixel(&pixels, w, i * 5 + 3, 8);
    assert_eq!(ink(0), f.colour);
    assert_eq!(ink(1), f.select_colour);
    assert_eq!(ink(2), f.select_colour);
    assert_eq!(ink(3), f.colour);
}

#[test]
fn test_markup_styles_reach_the_pixels() {
    let (w, h) = (60, 40);
    let mut ctx = context();
    let mut f = formatter(10.);
    let mut pixels = vec![0; w * h * 4];
    let tokens = tokens_from_markup(
        &[
            (theme::STYLE_NAME, "x"),
            (theme::STYLE_PUNCTUATION, ";"),
            ("Token.Text", "y"),
        ],
        &StyleTable::default(),
    );

    ctx.render_token_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, &tokens, true, false)
        .unwrap();

    assert_eq!(pixel(&pixels, w, 3, 8), theme::NAME_COLOUR);
    assert_eq!(pixel(&pixels, w, 8, 8), theme::PUNCTUATION_COLOUR);
    assert_eq!(pixel(&pixels, w, 13, 8), f.colour);
}

#[test]
fn test_formatter_is_sane_after_every_call() {
    let mut ctx = context();
    let mut f = formatter(10.);
    f.cursor = 50;
    f.first_drawn_char_pos = 70;
    f.select_start = 9;
    f.select_end = 4;

    ctx.render_para(&mut f, Vec2::ZERO, Region::new(0, 0, 100, 40), &mut [], 0, 0, Vec2::ZERO, "abc", false, true)
        .unwrap();

    assert_eq!(f.cursor, 3);
    assert_eq!(f.first_drawn_char_pos, 3);
    assert!(!f.has_selection());
    assert_eq!(f.font_size, 10.);
}

#[test]
fn test_each_newline_adds_one_line_and_resets_x() {
    let region = Region::new(10, 5, 100, 80);
    let mut ctx = context();
    let mut f = formatter(10.);

    let out = ctx
        .render_para(&mut f, Vec2::ZERO, region, &mut [], 0, 0, Vec2::ZERO, "a\nb\nc", false, false)
        .unwrap();
    assert_eq!(f.line, 2);
    assert_eq!(f.start_line_pos, 4);
    assert_eq!(out.pen, Vec2::new(15, 5 + 12 * 2));

    let mut g = formatter(10.);
    let out = ctx
        .render_para(&mut g, Vec2::ZERO, region, &mut [], 0, 0, Vec2::ZERO, "ab\n", false, false)
        .unwrap();
    assert_eq!(g.line, 1);
    assert_eq!(out.pen, Vec2::new(region.min.x, 5 + 12));
}

#[test]
fn test_vertical_columns_run_right_to_left() {
    let mut ctx = context();
    let mut f = formatter(10.);
    f.vertical = true;

    let out = ctx
        .render_para(&mut f, Vec2::ZERO, Region::new(0, 0, 60, 40), &mut [], 0, 0, Vec2::ZERO, "a\nb", false, false)
        .unwrap();

    // First column fitted against the right edge at 60 - 10, the next one line height left
    assert_eq!(f.line, 1);
    assert_eq!(out.pen, Vec2::new(38, 12));
}

#[test]
fn test_vertical_stops_when_columns_run_out() {
    let mut ctx = context();
    let mut f = formatter(10.);
    f.vertical = true;

    let out = ctx
        .render_para(&mut f, Vec2::ZERO, Region::new(0, 0, 25, 40), &mut [], 0, 0, Vec2::ZERO, "abcdefgh", false, false)
        .unwrap();

    assert!(out.exhausted);
    assert_eq!(out.placed, 2);
    assert_eq!(f.last_drawn_char_pos, 1);
}

#[test]
fn test_tail_buffer_follows_the_end() {
    let (w, h) = (22, 43);
    let mut ctx = context();
    let mut f = formatter(10.);
    f.tail_buffer = true;
    let mut pixels = vec![0; w * h * 4];

    let out = ctx
        .render_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, "abcdefghijklmnop", true, true)
        .unwrap();

    assert_eq!(f.cursor, 16);
    assert!(f.first_drawn_char_pos > 0);
    assert!(!out.exhausted);
    assert_eq!(f.last_drawn_char_pos, 15);
}

#[test]
fn test_pointer_on_each_pen_hits_that_glyph() {
    let region = Region::new(0, 0, 200, 100);
    let mut ctx = context();
    let f = formatter(10.);
    let tokens = tokenize("abc\ndef");

    for i in (0..tokens.len()).filter(|&i| !tokens[i].is_newline()) {
        let pen = pen_before(&mut ctx, &f, region, &tokens, i);
        assert_eq!(ctx.hit_test(&f, Vec2::ZERO, region, pen, &tokens).unwrap(), i, "pen {:?}", pen);
    }
}

#[test]
fn test_pointer_on_each_pen_hits_that_glyph_in_mixed_sizes() {
    let region = Region::new(0, 0, 200, 100);
    let mut ctx = context();
    let f = formatter(10.);
    let big = TokenStyle {
        font_size: Some(20.),
        ..TokenStyle::default()
    };
    let tokens = vec![
        Token::plain("a"),
        Token::new("X", big),
        Token::plain("b"),
        Token::plain("\n"),
        Token::new("Y", big),
        Token::plain("c"),
    ];

    for i in (0..tokens.len()).filter(|&i| !tokens[i].is_newline()) {
        let pen = pen_before(&mut ctx, &f, region, &tokens, i);
        assert_eq!(ctx.hit_test(&f, Vec2::ZERO, region, pen, &tokens).unwrap(), i, "pen {:?}", pen);
    }
}

#[test]
fn test_default_formatter_draws_no_debug_border() {
    let (w, h) = (60, 80);
    let mut ctx = context();
    let mut f = FormatParams::new();
    let mut pixels = vec![0; w * h * 4];

    ctx.render_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, "a", true, false)
        .unwrap();

    // 22x66 glyph box at the origin, ink in columns 2..11 and rows 7..22
    assert_eq!(pixel(&pixels, w, 5, 15), f.colour);
    for (x, y) in [(0, 0), (21, 0), (0, 65), (21, 65)] {
        assert_eq!(pixel(&pixels, w, x, y), Rgba::TRANSPARENT, "({}, {})", x, y);
    }
}

#[test]
fn test_pointer_past_the_end_hits_the_sentinel() {
    let mut ctx = context();
    let f = formatter(10.);
    let tokens = tokenize("abc");
    let hit = ctx
        .hit_test(&f, Vec2::ZERO, Region::new(0, 0, 100, 40), Vec2::new(90, 6), &tokens)
        .unwrap();
    assert_eq!(hit, tokens.len());
}

#[test]
fn test_repeat_render_reuses_cached_glyphs() {
    let (w, h) = (100, 40);
    let mut ctx = context();
    let mut pixels = vec![0; w * h * 4];

    let mut f = formatter(10.);
    ctx.render_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, "abba", true, true)
        .unwrap();
    let draws = ctx.backend().draw_calls();
    // "a" and "b" in the text colour plus the white "a" used to fit the origin
    assert_eq!(ctx.cache().len(), 3);

    let mut f = formatter(10.);
    ctx.render_para(&mut f, Vec2::ZERO, Region::full(w, h), &mut pixels, w, h, Vec2::ZERO, "abba", true, true)
        .unwrap();
    assert_eq!(ctx.backend().draw_calls(), draws);
}

#[test]
fn test_cjk_glyphs_advance_a_full_em() {
    let mut ctx = context();
    let mut f = formatter(10.);
    let out = ctx
        .render_para(&mut f, Vec2::ZERO, Region::new(0, 0, 100, 40), &mut [], 0, 0, Vec2::ZERO, "a漢", false, false)
        .unwrap();
    assert_eq!(out.pen, Vec2::new(15, 0));
}
