//! Performance benchmarks for the template pipeline.
//!
//! Measures the two phases separately:
//! - compile: parse plus import resolution, across template shapes
//! - render: evaluation of pre-compiled templates against fresh bindings

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use stencil::prelude::*;

fn engine() -> TemplateEngine {
    TemplateEngine::new(
        default_registry(),
        &default_imports(),
        &default_static_imports(),
    )
    .unwrap()
}

fn bindings() -> Bindings {
    Bindings::new()
        .with("greeting", "world")
        .with("one", 1i64)
        .with("two", 2i64)
        .with("ratio", 0.25)
}

const LITERAL_HEAVY: &str = "The quick brown fox jumps over the lazy dog. \
    Nothing here needs evaluation, just a straight copy of a medium-sized \
    run of literal text with one escaped \\{ brace.";

const EXPRESSION_HEAVY: &str = "{$one+$two} {$two*$two-$one} {$ratio*4.0} \
    {$greeting.toUpperCase()} {$greeting.substring(1,3)} \
    {$Math::min($one,$ratio)} {$Math::max(3,7)} {\"n=\"+$one}";

const MIXED: &str = "Hello {$greeting}, you have {$one+$two} messages \
    (ratio {$ratio*100.0}%). Yours, $greeting.";

fn bench_compile(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("compile");
    for (name, source) in [
        ("literal_heavy", LITERAL_HEAVY),
        ("expression_heavy", EXPRESSION_HEAVY),
        ("mixed", MIXED),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| engine.compile(black_box(source)).unwrap());
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("render");
    for (name, source) in [
        ("literal_heavy", LITERAL_HEAVY),
        ("expression_heavy", EXPRESSION_HEAVY),
        ("mixed", MIXED),
    ] {
        let template = engine.compile(source).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut bindings = bindings();
                engine.render(black_box(&template), &mut bindings).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile, bench_render);
criterion_main!(benches);
