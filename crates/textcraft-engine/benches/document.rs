use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
mod common;

fn bench_shift_on_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift_on_mutation");
    group.sample_size(20);

    let doc = common::generate_formatted_document(500);

    group.bench_function("insert_at_start", |b| {
        b.iter(|| {
            let mut doc = doc.clone();
            doc.insert_text(black_box(0), "prefix ");
            black_box(doc);
        });
    });

    group.bench_function("insert_at_end", |b| {
        let end = doc.len();
        b.iter(|| {
            let mut doc = doc.clone();
            doc.insert_text(black_box(end), " suffix");
            black_box(doc);
        });
    });

    group.bench_function("delete_middle", |b| {
        let middle = doc.len() / 2;
        b.iter(|| {
            let mut doc = doc.clone();
            doc.delete_text(black_box(middle), 100);
            black_box(doc);
        });
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(20);

    let doc = common::generate_formatted_document(500);
    group.bench_function("formatted_text", |b| {
        b.iter(|| black_box(doc.formatted_text()));
    });

    group.finish();
}

criterion_group!(benches, bench_shift_on_mutation, bench_rendering);
criterion_main!(benches);
