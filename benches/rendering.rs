//! Benchmarks for the markdown to preview pipeline.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use readme_studio::coordinator::{Coordinator, Tab};
use readme_studio::markdown::{ComrakRenderer, MarkdownRenderer, Sanitizer};

fn bench_render(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/profile.md");
    let renderer = ComrakRenderer::default();

    c.bench_function("render_profile", |b| {
        b.iter(|| renderer.render(black_box(md)))
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/profile.md");
    let html = ComrakRenderer::default().render(md).map(|out| out.html).unwrap_or_default();
    let sanitizer = Sanitizer::new();

    c.bench_function("sanitize_profile", |b| {
        b.iter(|| sanitizer.sanitize(black_box(&html)))
    });
}

fn bench_preview_refresh(c: &mut Criterion) {
    let md = include_str!("../tests/fixtures/profile.md");

    c.bench_function("coordinator_refresh", |b| {
        b.iter(|| {
            let mut coordinator = Coordinator::default();
            coordinator.set_buffer(black_box(md));
            coordinator.switch_tab(Tab::Preview);
            coordinator.view().lines().len()
        })
    });
}

criterion_group!(benches, bench_render, bench_sanitize, bench_preview_refresh);
criterion_main!(benches);
