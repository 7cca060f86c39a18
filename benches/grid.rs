use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bordersweeper::{
    bucket::BucketedIndex,
    generators::{checkerboard, paragraph, staircase},
    BorderOptions, Edge,
};

fn just_the_trace(c: &mut Criterion) {
    let rects = paragraph(50, 12);

    c.bench_function("just the trace", |b| {
        b.iter(|| {
            let index = BucketedIndex::new(&rects, Edge::Bottom);
            black_box(bordersweeper::trace::trace(&index))
        })
    });
}

fn paragraphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("paragraph border");
    let opts = BorderOptions::default();
    for rows in [10, 100, 1000] {
        let rects = paragraph(rows, 12);
        group.bench_with_input(BenchmarkId::from_parameter(rects.len()), &rects, |b, rects| {
            b.iter(|| black_box(bordersweeper::border(rects, &opts)))
        });
    }
    group.finish();
}

fn checkerboards(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkerboard border");
    let opts = BorderOptions::default().with_padding(0.0).with_flatten(true);
    for n in [10, 30, 100] {
        let rects = checkerboard(n);
        group.bench_with_input(BenchmarkId::from_parameter(rects.len()), &rects, |b, rects| {
            b.iter(|| black_box(bordersweeper::border(rects, &opts)))
        });
    }
    group.finish();
}

fn staircases(c: &mut Criterion) {
    let rects = staircase(1000);
    let opts = BorderOptions::default();
    c.bench_function("staircase border", |b| {
        b.iter(|| black_box(bordersweeper::border(&rects, &opts)))
    });
}

criterion_group!(benches, just_the_trace, paragraphs, checkerboards, staircases);
criterion_main!(benches);
