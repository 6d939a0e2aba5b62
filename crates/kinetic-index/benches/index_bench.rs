// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use kinetic_core::time::TimeDelta;
use kinetic_index::engine::{TrajectoryIndex, VisitFn};
use kinetic_index::paged::{IndexConfig, Node, PagedIndex};
use kinetic_index::storage::{EvictionBuffer, MemoryStore};
use kinetic_model::generator::{WorkloadConfig, WorkloadGenerator};
use kinetic_model::op::Operation;
use std::hint::black_box;

type BenchIndex = PagedIndex<f64, EvictionBuffer<Node<f64>, MemoryStore<Node<f64>>>>;

fn new_engine(capacity: usize) -> BenchIndex {
    PagedIndex::new(
        EvictionBuffer::new(MemoryStore::new(), 10),
        IndexConfig::new(capacity, TimeDelta::new(20.0)),
    )
}

fn workload(objects: usize, ticks: usize) -> Vec<Operation> {
    let generator = WorkloadGenerator::new(WorkloadConfig {
        objects,
        ticks,
        update_probability: 0.1,
        query_probability: 0.3,
        seed: 0xBEEF,
        ..WorkloadConfig::default()
    })
    .expect("bench config is valid");
    generator
        .generate()
        .iter()
        .map(Operation::from_record)
        .collect()
}

fn replay(index: &mut BenchIndex, ops: &[Operation]) {
    let mut found = 0u64;
    for op in ops {
        match op {
            Operation::Insert { id, region } => index.insert(None, *region, *id),
            Operation::Delete { id, region } => {
                assert!(index.delete(region, *id), "generated deletes must land");
            }
            Operation::Query { region } => {
                index.intersects_with(region, &mut VisitFn(|_id| found += 1));
            }
        }
    }
    black_box(found);
}

fn register_replay(c: &mut Criterion, objects: usize, ticks: usize) {
    let ops = workload(objects, ticks);
    let mut group = c.benchmark_group(format!("paged_index/replay/{objects}x{ticks}"));
    group.throughput(Throughput::Elements(ops.len() as u64));

    for &capacity in &[16usize, 64] {
        group.bench_function(format!("capacity_{capacity}"), |b| {
            b.iter_batched(
                || new_engine(capacity),
                |mut index| replay(&mut index, &ops),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    register_replay(c, 100, 50);
    register_replay(c, 400, 100);
}

criterion_group!(benches, bench_replay);
criterion_main!(benches);
