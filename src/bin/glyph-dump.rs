//! Dump code points 0..256 as ASCII-art C functions
//!
//! Each glyph becomes `char * letter_N()` returning its bitmap as a string,
//! '*' for ink and ' ' for background, every second row. A final
//! `letterlookup(int)` dispatches on the code point. Used to bake a font into
//! targets that have no rasterizer.
//!
//! Usage: glyph-dump [--size N] [--font FAMILY] [--font-file PATH] [--box]

use anyhow::{bail, Context};
use glyphpaste::text::theme;
use glyphpaste::{FontBackend, GlyphBitmap, Rgba, TextContext};
use std::fs;

const FIRST_CODE_POINT: u32 = 0;
const LAST_CODE_POINT: u32 = 256; // Exclusive
const INK_THRESHOLD: u8 = 128;

struct Options {
    size: f32,
    font: String,
    font_file: Option<String>,
    synthetic: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        size: 15.,
        font: theme::FONT_TEXT.to_string(),
        font_file: None,
        synthetic: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--size" => {
                let value = args.next().context("--size needs a value")?;
                options.size = value
                    .parse()
                    .with_context(|| format!("Bad point size {:?}", value))?;
            }
            "--font" => options.font = args.next().context("--font needs a family name")?,
            "--font-file" => options.font_file = Some(args.next().context("--font-file needs a path")?),
            "--box" => options.synthetic = true,
            other => bail!("Unknown argument {:?}", other),
        }
    }
    Ok(options)
}

/// Left half of the bitmap (the right half is margin), every second row
fn ascii_art(bitmap: &GlyphBitmap) -> String {
    let mut out = String::new();
    for y in (0..bitmap.height).step_by(2) {
        for x in 0..bitmap.width / 2 {
            out.push(if bitmap.alpha(x, y) > INK_THRESHOLD { '*' } else { ' ' });
        }
        out.push_str("\\n");
    }
    out
}

fn letter_c(index: u32, art: &str) -> String {
    format!("char * letter_{}() {{\nreturn(\"{}\");\n}}", index, art)
}

fn letterlookup_c() -> String {
    let mut out = String::from("char * letterlookup(int letter) {\n");
    for i in FIRST_CODE_POINT..LAST_CODE_POINT {
        out.push_str(&format!("\tif(letter=={}) {{ return(letter_{}()); }}\n", i, i));
    }
    out.push_str("\treturn(\"whoops\");\n}");
    out
}

fn dump<B: FontBackend>(ctx: &mut TextContext<B>, options: &Options) -> anyhow::Result<()> {
    for i in FIRST_CODE_POINT..LAST_CODE_POINT {
        // 0..256 are all valid scalar values
        let ch = char::from_u32(i).context("Code point out of range")?;
        let glyph = ctx
            .rasterize(&ch.to_string(), options.size, Rgba::WHITE, &options.font)
            .with_context(|| format!("Rasterizing U+{:04X}", i))?;
        log::debug!("U+{:04X}: {}x{}", i, glyph.bitmap.width, glyph.bitmap.height);
        println!("{}", letter_c(i, &ascii_art(&glyph.bitmap)));
    }
    println!("{}", letterlookup_c());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = parse_args()?;
    log::info!("Dumping glyphs at size {} from {:?}", options.size, options.font);

    if options.synthetic {
        let mut ctx = TextContext::new(glyphpaste::BoxBackend::new());
        return dump(&mut ctx, &options);
    }

    let mut ctx = TextContext::cosmic();
    if let Some(path) = &options.font_file {
        let data = fs::read(path).with_context(|| format!("Reading font file {}", path))?;
        ctx.backend_mut().load_font_data(data);
    }
    dump(&mut ctx, &options)
}
