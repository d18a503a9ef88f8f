use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use framepack_core::prelude::*;
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sprites(n: usize, seed: u64) -> Vec<(String, RgbaImage)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let w = rng.gen_range(8..=96);
            let h = rng.gen_range(8..=96);
            (
                format!("sprite_{i:03}"),
                RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])),
            )
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    for &n in &[50usize, 200] {
        let inputs = sprites(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &inputs, |b, inputs| {
            b.iter(|| {
                let mut builder = AtlasBuilder::new();
                for (name, img) in inputs {
                    builder.add(name.clone(), img.clone());
                }
                black_box(builder.pack(&PackConfig::default()).expect("pack"))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
