use criterion::{criterion_group, criterion_main, Criterion};
use edo_core::Region;
use edo_synth::{generate_population, summarize, GenerativeParams};

fn bench_generate(c: &mut Criterion) {
    let params = GenerativeParams::default();
    c.bench_function("generate_8_regions_x_600", |b| {
        b.iter(|| generate_population(&Region::ALL[..8], &params, 600, 42).expect("population"))
    });
}

fn bench_summarize(c: &mut Criterion) {
    let population =
        generate_population(Region::ALL, &GenerativeParams::default(), 600, 42).expect("population");
    c.bench_function("summarize_full_population", |b| {
        b.iter(|| summarize(&population.individuals))
    });
}

criterion_group!(benches, bench_generate, bench_summarize);
criterion_main!(benches);
