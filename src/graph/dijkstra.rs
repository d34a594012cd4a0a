use log::{debug, trace};

use super::{Distance, Graph, GraphEdge, NodeId, traversal::breadth_first};
use crate::heap::{BuildStrategy, IndexMap, MinHeap, SlotIndex, Slotted};

/// A node together with its (tentative or final) distance from the root.
///
/// Orders by distance first, ties are broken by node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reached {
    pub distance: Distance,
    pub node: NodeId,
}

impl Slotted for Reached {
    #[inline(always)]
    fn slot(&self) -> usize {
        self.node.0
    }
}

/// Computes the shortest distance from `root` to every node reachable from it.
///
/// Returns the reachable nodes in the order they were finalized, which is by
/// non-decreasing distance. Nodes that can't be reached from `root` are not part
/// of the result and keep the [`UNREACHED`](super::UNREACHED) distance. Every
/// reached node also records its distance and predecessor in the graph, see
/// [`Graph::path_to`].
pub fn shortest_paths<V>(graph: &mut Graph<V>, root: NodeId) -> Vec<Reached> {
    let positions = SlotIndex::with_capacity(graph.len());
    shortest_paths_with(graph, root, positions)
}

/// Like [`shortest_paths`], with `positions` locating nodes in the heap on decrease-key.
///
/// With an index map that doesn't track positions (e.g. [`Untracked`](crate::heap::Untracked))
/// every decrease-key falls back to a linear scan of the heap.
pub fn shortest_paths_with<V, M: IndexMap<Reached>>(
    graph: &mut Graph<V>,
    root: NodeId,
    positions: M,
) -> Vec<Reached> {
    let order = breadth_first(graph, root);
    if order.is_empty() {
        return Vec::new(); // Unknown root
    }

    graph.reset_search_state();
    graph[root].distance = 0;

    let frontier: Vec<Reached> = order
        .iter()
        .map(|&node| Reached {
            distance: graph[node].distance,
            node,
        })
        .collect();
    let mut heap: MinHeap<Reached, M> =
        MinHeap::from_vec_with(frontier, positions, BuildStrategy::Iterative);

    let mut settled = Vec::with_capacity(heap.len());
    let mut relaxations = 0usize;

    while let Some(current) = heap.try_remove_root() {
        graph[current.node].visited = true;

        for edge_idx in 0..graph[current.node].edges.len() {
            let GraphEdge { target, weight } = graph[current.node].edges[edge_idx];
            if graph[target].visited {
                continue; // Already finalized
            }

            let distance = current.distance.saturating_add(weight);
            if distance >= graph[target].distance {
                continue;
            }

            trace!(
                "Relaxing {} via {}: {} -> {}",
                target, current.node, graph[target].distance, distance
            );
            graph[target].distance = distance;
            graph[target].previous = Some(current.node);
            relaxations += 1;

            // Every unfinalized node reachable from the root is still in the heap
            match heap.locate(target.0) {
                Some(idx) => heap.update(idx, |entry| entry.distance = distance),
                None => debug_assert!(false, "Node {} is missing from the heap", target),
            }
        }

        settled.push(current);
    }

    debug!(
        "Settled {} of {} nodes from root {} with {} relaxations",
        settled.len(),
        graph.len(),
        root,
        relaxations
    );
    settled
}
