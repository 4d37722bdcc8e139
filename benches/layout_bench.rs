use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use glyphpaste::text::fill;
use glyphpaste::{BoxBackend, FormatParams, Region, Rgba, TextContext, Vec2};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog.\n\
    Pack my box with five dozen liquor jugs.\n\
    fn main() { println!(\"hello\"); }\n";

fn formatter() -> FormatParams {
    let mut f = FormatParams::new();
    f.font_size = 14.;
    f.outline = false;
    f
}

fn bench_layout(c: &mut Criterion) {
    let text = PARAGRAPH.repeat(6);
    let region = Region::full(WIDTH, HEIGHT);

    c.bench_function("render_para_warm_cache", |b| {
        let mut ctx = TextContext::new(BoxBackend::new());
        let mut pixels = vec![0u8; WIDTH * HEIGHT * 4];
        b.iter(|| {
            let mut f = formatter();
            ctx.render_para(
                &mut f,
                Vec2::ZERO,
                region,
                &mut pixels,
                WIDTH,
                HEIGHT,
                Vec2::new(200, 100),
                black_box(&text),
                true,
                true,
            )
        })
    });

    c.bench_function("hit_test_only", |b| {
        let mut ctx = TextContext::new(BoxBackend::new());
        let tokens = glyphpaste::tokenize(&text);
        let f = formatter();
        b.iter(|| ctx.hit_test(&f, Vec2::ZERO, region, black_box(Vec2::new(300, 40)), &tokens))
    });

    c.bench_function("fill_canvas", |b| {
        let mut pixels = vec![0u8; WIDTH * HEIGHT * 4];
        b.iter(|| fill(black_box(&mut pixels), WIDTH, Rgba::WHITE))
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
