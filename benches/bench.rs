use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use fastrand::Rng;
use heaps::{
    Graph, NodeId,
    graph::dijkstra::shortest_paths_with,
    heap::{BuildStrategy, Heap, Min, MinHeap, MinMax, SlotIndex, Untracked, Variant},
    sort::sort,
};

const NUM_VALUES: usize = 10_000;
const NUM_NODES: usize = 2_000;

fn random_values(len: usize) -> Vec<u32> {
    let mut rng = Rng::with_seed(12345);
    (0..len).map(|_| rng.u32(..)).collect()
}

fn random_graph(num_nodes: usize, degree: usize) -> Graph<usize> {
    let mut rng = Rng::with_seed(12345);
    let mut graph = Graph::with_capacity(num_nodes);
    for label in 1..=num_nodes {
        graph.add_node(label);
    }
    // Chain for connectivity, random arcs on top
    for idx in 1..num_nodes {
        graph.add_edge(NodeId(idx - 1), NodeId(idx), rng.u64(0..100));
    }
    for _ in 0..num_nodes * degree {
        let from = NodeId(rng.usize(0..num_nodes));
        let to = NodeId(rng.usize(0..num_nodes));
        graph.add_edge(from, to, rng.u64(0..100));
    }
    graph
}

fn bench_build<V: Variant>(c: &mut Criterion) {
    let values = random_values(NUM_VALUES);

    for (name, strategy) in [
        ("iterative", BuildStrategy::Iterative),
        ("recursive", BuildStrategy::Recursive),
    ] {
        c.bench_function(&format!("build_{}_{}", V::NAME, name), |b| {
            b.iter_batched(
                || values.clone(),
                |values| Heap::<u32, V, Untracked>::from_vec(black_box(values), strategy),
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_insert_remove(c: &mut Criterion) {
    let values = random_values(NUM_VALUES);

    c.bench_function("insert_remove_min", |b| {
        b.iter(|| {
            let mut heap: MinHeap<u32> = Heap::with_capacity(values.len());
            for &value in &values {
                heap.insert(value);
            }
            while let Some(root) = heap.try_remove_root() {
                black_box(root);
            }
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let values = random_values(NUM_VALUES);

    c.bench_function("heap_sort", |b| {
        b.iter_batched(
            || values.clone(),
            |mut values| sort(black_box(&mut values)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut graph = random_graph(NUM_NODES, 4);

    c.bench_function("dijkstra_slot_index", |b| {
        b.iter(|| {
            shortest_paths_with(
                &mut graph,
                black_box(NodeId(0)),
                SlotIndex::with_capacity(NUM_NODES),
            )
        })
    });
    c.bench_function("dijkstra_linear", |b| {
        b.iter(|| shortest_paths_with(&mut graph, black_box(NodeId(0)), Untracked))
    });
}

fn bench_builds(c: &mut Criterion) {
    bench_build::<Min>(c);
    bench_build::<MinMax>(c);
}

criterion_group!(
    benches,
    bench_builds,
    bench_insert_remove,
    bench_sort,
    bench_dijkstra
);
criterion_main!(benches);
