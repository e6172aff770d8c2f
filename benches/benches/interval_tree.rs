// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_interval::IntervalTree;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// One extent per piece of an `n x n x n` block decomposition of the unit cube.
fn block_grid(n: usize) -> Vec<[f64; 6]> {
    let h = 1.0 / n as f64;
    let mut out = Vec::with_capacity(n * n * n);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                let (x, y, z) = (i as f64 * h, j as f64 * h, k as f64 * h);
                out.push([x, x + h, y, y + h, z, z + h]);
            }
        }
    }
    out
}

/// Random per-piece scalar ranges in two derived-value dimensions.
fn scalar_ranges(count: usize) -> Vec<[f64; 4]> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|_| {
            let a = rng.next_f64() * 100.0;
            let b = rng.next_f64() * 100.0;
            [a, a + rng.next_f64() * 5.0, b, b + rng.next_f64() * 5.0]
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_tree_build");
    for &n in &[8_usize, 24, 48] {
        let pieces = block_grid(n);
        group.throughput(Throughput::Elements(pieces.len() as u64));
        group.bench_function(BenchmarkId::new("block_grid", pieces.len()), |b| {
            b.iter(|| IntervalTree::build(3, black_box(pieces.as_slice())).expect("valid extents"));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_tree_query");
    for &n in &[8_usize, 24, 48] {
        let tree = IntervalTree::build(3, &block_grid(n)).expect("valid extents");
        group.bench_function(BenchmarkId::new("slice_plane", tree.piece_count()), |b| {
            b.iter(|| black_box(tree.query_plane(&[1.0, 1.0, 1.0], black_box(1.5))));
        });
        group.bench_function(BenchmarkId::new("box", tree.piece_count()), |b| {
            b.iter(|| {
                black_box(tree.query_box(&[0.25, 0.25, 0.25], black_box(&[0.5, 0.5, 0.5])))
            });
        });
    }
    for &count in &[10_000_usize, 100_000] {
        let tree = IntervalTree::build(2, &scalar_ranges(count)).expect("valid extents");
        group.bench_function(BenchmarkId::new("scalar_equation", count), |b| {
            b.iter(|| black_box(tree.query_plane(&[2.0, -1.0], black_box(40.0))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
