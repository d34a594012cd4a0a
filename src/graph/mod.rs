//! Weighted graphs with nodes owned by an arena and addressed by [`NodeId`].

use std::ops::{Index, IndexMut};

pub mod dijkstra;
pub mod parser;
pub mod traversal;

pub type Weight = u64;
pub type Distance = u64;

/// Distance of a node that has not been reached from the root.
pub const UNREACHED: Distance = Distance::MAX;

/// Identifier for a node that is unique within a Graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An outgoing edge. Does not own its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub target: NodeId,
    pub weight: Weight,
}

#[derive(Debug, Clone)]
pub struct GraphNode<V> {
    pub value: V,
    pub edges: Vec<GraphEdge>,
    /// Distance from the root of the last search, [`UNREACHED`] if unknown.
    pub distance: Distance,
    /// Set by traversals on nodes they have seen and by Dijkstra on finalized nodes.
    pub visited: bool,
    /// Predecessor on the shortest path found by the last search.
    pub previous: Option<NodeId>,
}

impl<V> GraphNode<V> {
    fn new(value: V) -> Self {
        GraphNode {
            value,
            edges: Vec::new(),
            distance: UNREACHED,
            visited: false,
            previous: None,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.distance != UNREACHED
    }
}

#[derive(Debug, Clone)]
pub struct Graph<V> {
    nodes: Vec<GraphNode<V>>,
}

impl<V> Graph<V> {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    pub fn with_capacity(num_nodes: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(num_nodes),
        }
    }

    pub fn add_node(&mut self, value: V) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode::new(value));
        id
    }

    /// Adds a directed edge from `from` to `to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        debug_assert!(self.contains(to), "Edge target {} is not in the graph", to);
        self[from].edges.push(GraphEdge { target: to, weight });
    }

    /// Adds an edge in both directions.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + use<V> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode<V>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node))
    }

    /// Forgets the results of previous searches.
    pub fn reset_search_state(&mut self) {
        for node in &mut self.nodes {
            node.distance = UNREACHED;
            node.visited = false;
            node.previous = None;
        }
    }

    pub(crate) fn clear_visited(&mut self) {
        for node in &mut self.nodes {
            node.visited = false;
        }
    }

    /// The path from the root of the last search to `target`, both included.
    /// `None` if the target was not reached.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.contains(target) || !self[target].is_reached() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(previous) = self[current].previous {
            // Predecessor links form a tree, a path can't be longer than the graph
            debug_assert!(path.len() <= self.nodes.len(), "Cycle in predecessor links");
            path.push(previous);
            current = previous;
        }
        path.reverse();
        Some(path)
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<NodeId> for Graph<V> {
    type Output = GraphNode<V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl<V> IndexMut<NodeId> for Graph<V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}
