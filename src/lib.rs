//! Array-backed binary heaps (min, max and min-max) and Dijkstra's shortest
//! paths on top of them.
//!
//! ```
//! use heaps::heap::{BuildStrategy, MinHeap};
//!
//! let mut heap: MinHeap<i32> = MinHeap::from_vec(vec![5, 3, 8, 1], BuildStrategy::Iterative);
//! heap.insert(0);
//! assert_eq!(heap.try_remove_root(), Some(0));
//! assert_eq!(heap.try_find_root(), Some(&1));
//! ```

pub mod constants;
pub mod graph;
pub mod heap;
pub mod index;
pub mod sort;
pub mod utils;

pub use graph::{Graph, NodeId, dijkstra::shortest_paths, parser::parse_dimacs_graph};
pub use heap::{Heap, MaxHeap, MinHeap, MinMaxHeap};
