use crate::cli::{self, Lookup};
use comfy_table::{Cell, ContentArrangement, Table};
use heaps::{
    graph::{
        Graph, NodeId,
        dijkstra::{Reached, shortest_paths_with},
    },
    heap::{SlotIndex, Untracked},
    measure_time, parse_dimacs_graph,
    utils::human_duration,
};
use itertools::Itertools;
use log::{error, info, warn};
use memmap2::Mmap;
use num_format::{Locale, ToFormattedString};
use std::{error::Error, fs::File, path::PathBuf};

pub fn paths(
    path: PathBuf,
    root: usize,
    lookup: Lookup,
    limit: Option<usize>,
    full_paths: bool,
) -> Result<(), Box<dyn Error>> {
    cli::init_logging();

    // Parse the graph
    let (graph, parse_duration) = {
        let file = File::open(&path)?;
        // SAFETY: mapping a file is safe as long as the file isn't modified concurrently.
        let mmap = unsafe { Mmap::map(&file)? };
        measure_time!({ parse_dimacs_graph(&mmap) })
    };
    let mut graph = graph.map_err(|e| {
        error!("Error while parsing {:?}: {}", path, e);
        e
    })?;
    info!(
        "Parsed {:?}: {} nodes, {} arcs in {}",
        path,
        graph.len().to_formatted_string(&Locale::en),
        graph.num_edges().to_formatted_string(&Locale::en),
        human_duration(parse_duration)
    );

    if root == 0 || root > graph.len() {
        return Err(format!(
            "Root {} is not a node of the graph (1 to {})",
            root,
            graph.len()
        )
        .into());
    }
    let root = NodeId(root - 1);
    let num_nodes = graph.len();

    let (settled, solve_duration) = measure_time!({
        match lookup {
            Lookup::SlotIndex => {
                shortest_paths_with(&mut graph, root, SlotIndex::with_capacity(num_nodes))
            }
            Lookup::Linear => shortest_paths_with(&mut graph, root, Untracked),
        }
    });
    info!(
        "Settled {} nodes in {} ({:?} lookup)",
        settled.len().to_formatted_string(&Locale::en),
        human_duration(solve_duration),
        lookup
    );

    let unreached = num_nodes - settled.len();
    if unreached > 0 {
        warn!(
            "{} nodes are not reachable from node {}",
            unreached.to_formatted_string(&Locale::en),
            graph[root].value
        );
    }

    print_settled(&graph, &settled, limit, full_paths);
    Ok(())
}

fn print_settled(
    graph: &Graph<usize>,
    settled: &[Reached],
    limit: Option<usize>,
    full_paths: bool,
) {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#",
            "Node",
            "Distance",
            if full_paths { "Path" } else { "Previous" },
        ]);

    let shown = limit.unwrap_or(settled.len()).min(settled.len());
    for (rank, reached) in settled.iter().take(shown).enumerate() {
        let node = &graph[reached.node];
        let route = if full_paths {
            graph
                .path_to(reached.node)
                .map(|path| path.iter().map(|&id| graph[id].value).join(" → "))
                .unwrap_or_default()
        } else {
            node.previous
                .map(|previous| graph[previous].value.to_string())
                .unwrap_or_else(|| "-".to_string())
        };

        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(node.value),
            Cell::new(reached.distance.to_formatted_string(&Locale::en)),
            Cell::new(route),
        ]);
    }

    println!("\n{table}");
    if shown < settled.len() {
        println!("... {} more", (settled.len() - shown).to_formatted_string(&Locale::en));
    }
}
