use criterion::{black_box, criterion_group, criterion_main, Criterion};

use duodex::{AnalyzerOptions, Tokenizer};

const LINE_EN: &str = "The quick brown fox jumps over the lazy dog, doesn't stop-now at 3.14 meters";
const LINE_RU: &str = "Быстрая коричневая лиса перепрыгивает через ленивую собаку — это тест";

fn bench_tokenize(c: &mut Criterion) {
    let plain = Tokenizer::new(&AnalyzerOptions::default());
    let stemming = Tokenizer::new(&AnalyzerOptions { stem: true });

    let mut mixed = String::new();
    for _ in 0..50 {
        mixed.push_str(LINE_EN);
        mixed.push(' ');
        mixed.push_str(LINE_RU);
        mixed.push(' ');
    }
    let bytes = mixed.as_bytes();

    c.bench_function("tokenize_mixed", |b| {
        b.iter(|| plain.tokenize_line(black_box(bytes)))
    });
    c.bench_function("tokenize_mixed_stemmed", |b| {
        b.iter(|| stemming.tokenize_line(black_box(bytes)))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
