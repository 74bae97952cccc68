use criterion::{criterion_group, criterion_main, Criterion};
use search_core::{IndexConfig, SearchIndex};

const WORDS: &[&str] = &[
    "history", "war", "peace", "river", "garden", "night", "city", "letters", "journey", "stone",
    "winter", "sea", "house", "empire", "song", "shadow", "light", "children", "kingdom", "island",
];

fn catalog(n: usize) -> Vec<(usize, String)> {
    (0..n)
        .map(|i| {
            let title = format!("{} {} {}", WORDS[i % 20], WORDS[(i / 20) % 20], WORDS[(i * 7) % 20]);
            (i, format!("{title} author{}", i % 997))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let docs = catalog(20_000);
    c.bench_function("build_20k", |b| b.iter(|| SearchIndex::build(docs.clone(), &IndexConfig::default()).unwrap()));
}

fn bench_rank(c: &mut Criterion) {
    let idx = SearchIndex::build(catalog(100_000), &IndexConfig::default()).unwrap();
    c.bench_function("rank_top10", |b| b.iter(|| idx.rank("war river author42", 10)));
}

criterion_group!(benches, bench_build, bench_rank);
criterion_main!(benches);
