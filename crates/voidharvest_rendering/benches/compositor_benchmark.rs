//! Compositor compose and stringify benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voidharvest_rendering::{
    BlendMode, Bounds, Compositor, Glyph, GlyphPanel, Layer, Rgb, TvFrame,
};

fn full_scene(width: usize, height: usize) -> Compositor {
    let mut compositor = Compositor::new(width, height);
    compositor.register_content(Box::new(GlyphPanel::filled(
        Layer::Game,
        0,
        Bounds::new(width, height),
        Glyph::solid('.', Rgb::new(90, 90, 90)),
    )));
    compositor.register_content(Box::new(GlyphPanel::filled(
        Layer::Ui,
        10,
        Bounds::new(width / 2, height / 2),
        Glyph::solid('#', Rgb::new(40, 200, 120))
            .with_alpha(0.6)
            .with_blend(BlendMode::Additive),
    )));
    compositor.register_content(Box::new(TvFrame::new(width, height)));
    compositor
}

fn bench_render_full(c: &mut Criterion) {
    let mut compositor = full_scene(120, 40);
    c.bench_function("render_full_120x40", |b| {
        b.iter(|| black_box(compositor.render()));
    });
}

fn bench_render_patch(c: &mut Criterion) {
    let mut compositor = full_scene(120, 40);
    let _ = compositor.render_patch();
    c.bench_function("render_patch_120x40", |b| {
        b.iter(|| black_box(compositor.render_patch()));
    });
}

criterion_group!(benches, bench_render_full, bench_render_patch);
criterion_main!(benches);
