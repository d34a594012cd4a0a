use std::collections::VecDeque;

use super::{Graph, NodeId};

/// All nodes reachable from `root` over outgoing edges, in breadth-first order.
///
/// Leaves exactly the returned nodes marked as visited. An unknown root yields no nodes.
pub fn breadth_first<V>(graph: &mut Graph<V>, root: NodeId) -> Vec<NodeId> {
    if !graph.contains(root) {
        return Vec::new();
    }
    graph.clear_visited();

    let mut queue = VecDeque::new();
    let mut order = Vec::new();

    graph[root].visited = true;
    queue.push_back(root);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for edge_idx in 0..graph[id].edges.len() {
            let target = graph[id].edges[edge_idx].target;
            if !graph[target].visited {
                graph[target].visited = true;
                queue.push_back(target);
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadth_first_order() {
        //   0 -> 1 -> 3
        //   |         ^
        //   v         |
        //   2 --------+     4 (isolated)
        let mut graph = Graph::new();
        let ids: Vec<NodeId> = (0..5).map(|i| graph.add_node(i)).collect();
        graph.add_edge(ids[0], ids[1], 1);
        graph.add_edge(ids[0], ids[2], 1);
        graph.add_edge(ids[1], ids[3], 1);
        graph.add_edge(ids[2], ids[3], 1);
        graph.add_edge(ids[3], ids[0], 1);

        let order = breadth_first(&mut graph, ids[0]);
        assert_eq!(order, vec![ids[0], ids[1], ids[2], ids[3]]);
        assert!(!graph[ids[4]].visited);

        // Only outgoing edges count
        let order = breadth_first(&mut graph, ids[2]);
        assert_eq!(order, vec![ids[2], ids[3], ids[0], ids[1]]);

        let order = breadth_first(&mut graph, ids[4]);
        assert_eq!(order, vec![ids[4]]);
        assert!(!graph[ids[0]].visited);

        assert!(breadth_first(&mut graph, NodeId(99)).is_empty());
    }
}
