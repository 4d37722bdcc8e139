//! Styled text units fed to the paragraph layout engine.
//!
//! A paragraph is a flat sequence of [`Token`]s, normally one per code point.
//! Colour rules live in a [`StyleTable`] keyed by style tag, and a pluggable
//! classifier maps each unit of plain text to a tag.

use std::collections::HashMap;

use super::{FormatParams, Rgba};
use crate::text::theme;

/// Per-token style. `None` fields fall back to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TokenStyle {
    pub foreground: Option<Rgba>,
    pub glow: Option<Rgba>,      // Halo drawn under the glyph
    pub font_size: Option<f32>,  // Starts an oversized run, ends at the next space/newline
}

impl TokenStyle {
    pub fn coloured(colour: Rgba) -> Self {
        Self {
            foreground: Some(colour),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub style: TokenStyle,
}

impl Token {
    pub fn new(text: impl Into<String>, style: TokenStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TokenStyle::default())
    }

    pub fn is_newline(&self) -> bool {
        is_newline(&self.text)
    }

    /// First code point of the token, used for font choice and metrics
    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn is_space(&self) -> bool {
        self.first_char().map_or(false, char::is_whitespace)
    }
}

/// Hard line break, either a real newline or the escaped form lexers emit
pub fn is_newline(text: &str) -> bool {
    text == "\n" || text == "\\n"
}

/// Style tag -> colour configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    colours: HashMap<String, Rgba>,
}

impl Default for StyleTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(theme::STYLE_NAME, theme::NAME_COLOUR);
        table.set(theme::STYLE_PUNCTUATION, theme::PUNCTUATION_COLOUR);
        table.set(theme::STYLE_BUILTIN, theme::BUILTIN_COLOUR);
        table.set(theme::STYLE_HIGHLIGHT, theme::HIGHLIGHT_COLOUR);
        table
    }
}

impl StyleTable {
    pub fn empty() -> Self {
        Self {
            colours: HashMap::new(),
        }
    }

    /// Default table with the highlight tag taken from the formatter
    pub fn for_formatter(f: &FormatParams) -> Self {
        let mut table = Self::default();
        table.set(theme::STYLE_HIGHLIGHT, f.highlight_colour);
        table
    }

    pub fn set(&mut self, tag: &str, colour: Rgba) {
        self.colours.insert(tag.to_string(), colour);
    }

    pub fn colour(&self, tag: &str) -> Option<Rgba> {
        self.colours.get(tag).copied()
    }

    /// Style for a tag, unknown tags render in the formatter colour
    pub fn style(&self, tag: Option<&str>) -> TokenStyle {
        TokenStyle {
            foreground: tag.and_then(|t| self.colour(t)),
            ..TokenStyle::default()
        }
    }
}

/// Expand tabs the same way for plain text and lexer output
fn expand_unit(unit: &str) -> &str {
    match unit {
        "\t" | "\\t" => theme::TAB_EXPANSION,
        "\\n" => "\n",
        other => other,
    }
}

/// One token per code point with a uniform (formatter) style.
/// Tabs stay a single token so indices keep matching the source text.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut buf = [0u8; 4];
    text.chars()
        .map(|ch| Token::plain(expand_unit(ch.encode_utf8(&mut buf))))
        .collect()
}

/// One token per code point, style chosen by `classify`
pub fn tokenize_classified<'c, F>(text: &str, table: &StyleTable, mut classify: F) -> Vec<Token>
where
    F: FnMut(&str) -> Option<&'c str>,
{
    let mut buf = [0u8; 4];
    text.chars()
        .map(|ch| {
            let unit = ch.encode_utf8(&mut buf);
            let style = table.style(classify(unit));
            Token::new(expand_unit(unit), style)
        })
        .collect()
}

/// Classifier that toggles `tag` on every whitespace unit, so alternate words stand out
pub fn alternate_words<'t>(tag: &'t str) -> impl FnMut(&str) -> Option<&'t str> + 't {
    let mut on = false;
    move |unit: &str| {
        if unit.chars().next().map_or(false, char::is_whitespace) {
            on = !on;
        }
        if on {
            Some(tag)
        } else {
            None
        }
    }
}

/// Tokens from pre-lexed `(style tag, text)` pairs
pub fn tokens_from_markup(markup: &[(&str, &str)], table: &StyleTable) -> Vec<Token> {
    markup
        .iter()
        .map(|&(tag, text)| Token::new(expand_markup(text), table.style(Some(tag))))
        .collect()
}

/// Lexer text keeps escapes literal: a lone `\\n` is a line break, tabs expand anywhere
fn expand_markup(text: &str) -> String {
    match text {
        "\\n" => "\n".to_string(),
        _ => text
            .replace("\\t", theme::TAB_EXPANSION)
            .replace('\t', theme::TAB_EXPANSION),
    }
}
