use criterion::{criterion_group, criterion_main, Criterion};
use engine::{Document, EngineConfig, SearchEngine, Tokenizer};

const TEXT: &str = "The quick brown fox jumps over the lazy dog. \"Quoted,\" she said; \
    punctuation: everywhere! Does it trim? It should trim edges, not in:side.";

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::new(3, 20);
    let text = TEXT.repeat(32);
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenizer.tokenize(&text)));
}

fn bench_search(c: &mut Criterion) {
    let docs = (0..50_000).map(|i| Document::new(format!("common item{i} bucket{} tail{}", i % 10, i % 7), ""));
    let config = EngineConfig { max_search_results: 100, ..EngineConfig::default() };
    let engine = SearchEngine::from_documents(config, docs).unwrap();
    c.bench_function("search_three_terms", |b| b.iter(|| engine.search(&["common", "bucket3", "tail5"])));
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
