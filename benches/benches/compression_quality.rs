//! End-to-end compression benchmarks
//!
//! Run with: cargo bench --bench compression_quality

use blockdct_codec::{CompressOptions, Compressor};
use blockdct_core::Image;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Helper to create a test image with gradient pattern
fn create_test_image(width: usize, height: usize) -> Image {
    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) * 3;
            data[idx] = ((x * 255) / width) as u8;
            data[idx + 1] = ((y * 255) / height) as u8;
            data[idx + 2] = 128;
        }
    }
    Image::from_interleaved(width, height, &data).unwrap()
}

fn bench_compress_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compress by Image Size");

    for &size in &[64, 128, 256, 512] {
        let image = create_test_image(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            let compressor = Compressor::new(CompressOptions::default().parallel(parallel));
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}x{}", size, size)),
                &size,
                |b, _| b.iter(|| compressor.compress(black_box(&image)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_quality_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compress by Quality");
    let image = create_test_image(128, 128);

    for quality in [10, 50, 75, 95] {
        let compressor = Compressor::new(CompressOptions::default().quality(quality));
        group.bench_with_input(BenchmarkId::new("quality", quality), &quality, |b, _| {
            b.iter(|| compressor.compress(black_box(&image)).unwrap());
        });
    }

    // Report fidelity once so benchmark runs double as a quality check
    for quality in [10, 50, 75, 95] {
        let metrics = Compressor::new(CompressOptions::default().quality(quality))
            .compress(&image)
            .unwrap()
            .metrics();
        println!("quality {:>3}: PSNR {:.2} dB, MSE {:.2}", quality, metrics.psnr, metrics.mse);
    }

    group.finish();
}

criterion_group!(benches, bench_compress_by_size, bench_quality_levels);
criterion_main!(benches);
