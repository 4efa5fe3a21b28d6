use criterion::{criterion_group, criterion_main, Criterion};
use joaat_restore::hasher::{joaat, CachedHasher, Joaat, TokenHasher};
use joaat_restore::{apply, NameTable};
use std::hint::black_box;

fn names() -> Vec<String> {
    (0..5000).map(|i| format!("Prop_Bench_{:04}a", i)).collect()
}

fn benchmark_hashing(c: &mut Criterion) {
    let names = names();

    c.bench_function("joaat_uncached", |b| {
        b.iter(|| {
            for name in &names {
                black_box(joaat(black_box(name)));
            }
        })
    });

    let cached = CachedHasher::new(Joaat, 1024);
    c.bench_function("joaat_cached_hot", |b| {
        b.iter(|| {
            for name in names.iter().take(512) {
                black_box(cached.token(black_box(name)));
            }
        })
    });
}

fn benchmark_substitution(c: &mut Criterion) {
    let names = names();
    let table = NameTable::from_lines(names.iter(), &Joaat);
    let document: String = names
        .iter()
        .map(|name| format!("<Item><archetypeName>{}</archetypeName></Item>\n", Joaat.token(name)))
        .collect();

    c.bench_function("apply_5000_tokens", |b| {
        b.iter(|| black_box(apply(black_box(&document), &table)))
    });

    let untouched = document.replace("hash_", "name_");
    c.bench_function("apply_no_tokens", |b| {
        b.iter(|| black_box(apply(black_box(&untouched), &table)))
    });
}

criterion_group!(benches, benchmark_hashing, benchmark_substitution);
criterion_main!(benches);
