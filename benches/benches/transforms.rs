//! Benchmarks for the DCT and quantization kernel
//!
//! Run with: cargo bench --bench transforms

use blockdct_transform::{Block, Dct2d, QuantMatrix};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn test_block(size: usize) -> Block {
    Block::from_vec(
        size,
        (0..size * size).map(|i| ((i * 13) % 256) as f64 - 128.0).collect(),
    )
    .unwrap()
}

fn bench_dct(c: &mut Criterion) {
    let mut group = c.benchmark_group("DCT Transform");

    for size in [4, 8, 16, 32] {
        let dct = Dct2d::new(size).unwrap();
        let input = test_block(size);
        let coeffs = dct.forward(&input).unwrap();

        group.bench_with_input(BenchmarkId::new("forward", size), &size, |b, _| {
            b.iter(|| dct.forward(black_box(&input)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("inverse", size), &size, |b, _| {
            b.iter(|| dct.inverse(black_box(&coeffs)).unwrap());
        });
    }

    group.finish();
}

fn bench_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantization");

    group.bench_function("generate_8x8", |b| {
        b.iter(|| QuantMatrix::generate(black_box(75), black_box(8)).unwrap());
    });

    let matrix = QuantMatrix::generate(75, 8).unwrap();
    let coeffs = Dct2d::new(8).unwrap().forward(&test_block(8)).unwrap();
    group.bench_function("quantize_8x8", |b| {
        b.iter(|| {
            let mut block = coeffs.clone();
            matrix.quantize_block(black_box(&mut block)).unwrap();
            block
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dct, bench_quantization);
criterion_main!(benches);
