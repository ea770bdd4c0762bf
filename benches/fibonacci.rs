use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seed_core::fibonacci::{is_fibonacci, next_fibonacci};
use seed_core::MainSeed;

fn bench_fibonacci(c: &mut Criterion) {
    c.bench_function("is_fibonacci_0_to_1000", |b| {
        b.iter(|| (0..1000i64).filter(|n| is_fibonacci(black_box(*n))).count())
    });

    c.bench_function("next_fibonacci_large", |b| {
        b.iter(|| next_fibonacci(black_box(7_000_000_000_000_000_000)))
    });
}

fn bench_seed(c: &mut Criterion) {
    c.bench_function("add_description_to_asset_100", |b| {
        b.iter(|| {
            let mut seed = MainSeed::new();
            for i in 0..100 {
                let asset = format!("asset-{}", i % 10);
                let descriptor = format!("desc-{}", i % 7);
                let _ = seed.add_description_to_asset(&asset, &descriptor, &format!("word{i}"));
            }
            seed
        })
    });

    let mut seed = MainSeed::new();
    for i in 0..200 {
        let _ = seed.add_description_to_asset(&format!("asset-{}", i % 40), &format!("desc-{}", i % 13), "shared");
    }
    c.bench_function("asset_relations_40_assets", |b| {
        b.iter(|| seed.asset_relations(black_box("asset-0")))
    });
}

criterion_group!(benches, bench_fibonacci, bench_seed);
criterion_main!(benches);
