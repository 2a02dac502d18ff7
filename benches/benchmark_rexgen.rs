use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rexgen::{Generator, Mode};

pub fn benchmark_construction(c: &mut Criterion) {
    c.bench_function("compile phone number pattern", |b| {
        b.iter(|| black_box(Generator::new(r"\d{2,3}-\d{3,4}-\d{3,4}", "").unwrap()))
    });
}

pub fn benchmark_generation(c: &mut Criterion) {
    let mut generator = Generator::with_rng(
        r"[\p{Hiragana}\p{Katakana}]{16}",
        "",
        Mode::Uniform,
        SmallRng::seed_from_u64(0x12345678),
    )
    .unwrap();

    c.bench_function("generate kana runs", |b| {
        b.iter(|| black_box(generator.generate()))
    });
}

pub fn benchmark_generation_distinct(c: &mut Criterion) {
    let mut generator = Generator::with_rng(
        r"\w{1,32}@\w{1,16}\.(com|net|org)",
        "",
        Mode::DistinctRunes,
        SmallRng::seed_from_u64(0x12345678),
    )
    .unwrap();

    c.bench_function("generate addresses (distinct runes)", |b| {
        b.iter(|| black_box(generator.generate()))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(1000);
    targets = benchmark_construction, benchmark_generation, benchmark_generation_distinct
);
criterion_main!(benches);
