// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_subset::{Role, SelectionState, SetArray, Turn};

fn domains(count: usize) -> SetArray {
    SetArray::builder("domains", Role::Domain)
        .prefix("dom%06d")
        .count(count)
        .first_global_index(1)
        .build()
        .expect("valid set array")
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_subset");
    for &n in &[1_000_usize, 100_000, 1_000_000] {
        let array = domains(n);
        let mut selection = SelectionState::new(n + 1);
        // Every fourth domain selected.
        let candidates: Vec<usize> = (0..n).step_by(4).collect();
        array.restrict_to(&mut selection, &candidates, false);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("aggregate_state", n), |b| {
            b.iter(|| black_box(array.aggregate_state(black_box(&selection))));
        });
        group.bench_function(BenchmarkId::new("bulk_set_state", n), |b| {
            let mut selection = selection.clone();
            b.iter(|| array.bulk_set_state(black_box(&mut selection), Turn::Off, true));
        });
        group.bench_function(BenchmarkId::new("restrict_to", n), |b| {
            let mut selection = selection.clone();
            b.iter(|| array.restrict_to(black_box(&mut selection), &candidates, true));
        });
        group.bench_function(BenchmarkId::new("resolve_global_index", n), |b| {
            let name = array.get_set(n / 2).into_name();
            b.iter(|| black_box(array.resolve_global_index(black_box(&name))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_selection);
criterion_main!(benches);
