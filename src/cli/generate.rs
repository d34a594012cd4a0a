use fastrand::Rng;
use log::info;
use std::{
    error::Error,
    io::{self, BufWriter, Write},
};

use crate::cli;

/// Writes a random connected graph in DIMACS shortest-path format to stdout.
///
/// A random spanning tree over a shuffled node order connects every node to
/// node 1, the remaining arcs join random pairs.
pub fn generate(
    num_nodes: usize,
    degree: usize,
    max_weight: u64,
    undirected: bool,
    seed: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    cli::init_logging();

    if num_nodes == 0 {
        return Err("A graph needs at least one node".into());
    }

    let mut rng = seed.map(Rng::with_seed).unwrap_or_else(Rng::new);
    let seed = rng.get_seed();
    info!(
        "Generating {} nodes with degree {} (seed {})",
        num_nodes, degree, seed
    );

    // Node 1 first, so that it reaches every other node
    let mut order: Vec<usize> = (2..=num_nodes).collect();
    rng.shuffle(&mut order);
    order.insert(0, 1);

    let mut edges = Vec::with_capacity(num_nodes * degree.max(1));
    for (position, &node) in order.iter().enumerate().skip(1) {
        let parent = order[rng.usize(0..position)];
        edges.push((parent, node, rng.u64(0..=max_weight)));
    }

    let num_tree_edges = edges.len();
    let num_extra_edges = (num_nodes * degree).saturating_sub(num_tree_edges);
    for _ in 0..num_extra_edges {
        let from = rng.usize(1..=num_nodes);
        let to = rng.usize(1..=num_nodes);
        edges.push((from, to, rng.u64(0..=max_weight)));
    }

    let num_arcs = if undirected {
        edges.len() * 2
    } else {
        edges.len()
    };

    let stdout = io::stdout();
    let handle = stdout.lock();
    let mut writer = BufWriter::new(handle);

    writeln!(
        writer,
        "c Random connected graph, {} nodes, weights 0 to {}, seed {}",
        num_nodes, max_weight, seed
    )?;
    writeln!(writer, "p sp {} {}", num_nodes, num_arcs)?;
    for (from, to, weight) in edges {
        writeln!(writer, "a {} {} {}", from, to, weight)?;
        if undirected {
            writeln!(writer, "a {} {} {}", to, from, weight)?;
        }
    }

    writer.flush()?;
    Ok(())
}
