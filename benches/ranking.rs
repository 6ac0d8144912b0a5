//! Performance benchmarks for the ranking primitives and the Float16 codec.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hybridqa_search::codec;
use hybridqa_search::ranking::{concise_match_boost, tokens, within1};

fn sample_questions(count: usize) -> Vec<String> {
    let templates = [
        "What is Dart?",
        "How do I install Flutter on macOS?",
        "What is a StatelessWidget?",
        "How does hot reload work in Flutter?",
        "What is the difference between var and final in Dart?",
    ];
    (0..count)
        .map(|i| format!("{} (variant {})", templates[i % templates.len()], i))
        .collect()
}

fn bench_tokens(c: &mut Criterion) {
    let questions = sample_questions(1000);
    let mut group = c.benchmark_group("tokens");
    group.bench_function("tokenize_1000_questions", |b| {
        b.iter(|| {
            for q in &questions {
                black_box(tokens(q));
            }
        })
    });
    group.finish();
}

fn bench_within1(c: &mut Criterion) {
    let pairs = vec![
        ("dart", "dort"),
        ("flutter", "fluter"),
        ("widget", "widgett"),
        ("statelesswidget", "statefulwidget"),
    ];
    let mut group = c.benchmark_group("within1");
    for (a, b_word) in pairs {
        group.bench_with_input(BenchmarkId::new("pair", format!("{a}-{b_word}")), &(a, b_word), |b, &(x, y)| {
            b.iter(|| black_box(within1(x, y)))
        });
    }
    group.finish();
}

fn bench_concise_match_boost(c: &mut Criterion) {
    let query_words = tokens("what is dart");
    let questions = sample_questions(1000);
    let mut group = c.benchmark_group("concise_match_boost");
    group.bench_function("score_1000_questions", |b| {
        b.iter(|| {
            for q in &questions {
                black_box(concise_match_boost(&query_words, q, 0.5, 1));
            }
        })
    });
    group.finish();
}

fn bench_codec_round_trip(c: &mut Criterion) {
    let dim = 384;
    let counts = [100usize, 1_000, 10_000];

    let mut group = c.benchmark_group("codec_round_trip");
    for &count in &counts {
        let vectors: Vec<Vec<f32>> = (0..count)
            .map(|i| (0..dim).map(|j| ((i + j) as f32).sin()).collect())
            .collect();
        let encoded = codec::encode(&vectors);

        group.bench_with_input(BenchmarkId::new("encode", count), &vectors, |b, v| {
            b.iter(|| black_box(codec::encode(v)))
        });
        group.bench_with_input(BenchmarkId::new("decode", count), &encoded, |b, bytes| {
            b.iter(|| black_box(codec::decode(bytes).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_tokens,
    bench_within1,
    bench_concise_match_boost,
    bench_codec_round_trip
);
criterion_main!(benches);
