use clap::{Parser, Subcommand};
use std::{error::Error, path::PathBuf};

mod cli;

use cli::{Lookup, VariantArg};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Computes shortest paths in a DIMACS shortest-path (.gr) graph
    Paths {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// 1-indexed root node
        #[arg(short, long, default_value_t = 1)]
        root: usize,

        #[arg(long, value_enum, default_value_t = Lookup::SlotIndex)]
        lookup: Lookup,

        /// Print at most this many settled nodes
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the full path to each node instead of its predecessor
        #[arg(long)]
        paths: bool,
    },
    /// Checks heap invariants on random arrays
    Check {
        #[arg(long, value_enum, default_value_t = VariantArg::Min)]
        variant: VariantArg,

        #[arg(long, default_value_t = 1000)]
        rounds: usize,

        /// Maximal number of elements per round
        #[arg(long, default_value_t = 256)]
        max_len: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        no_progress_bar: bool,
    },
    /// Writes a random connected graph in DIMACS shortest-path format to stdout
    Generate {
        num_nodes: usize,

        /// Average number of outgoing arcs per node
        #[arg(long, default_value_t = 4)]
        degree: usize,

        #[arg(long, default_value_t = 100)]
        max_weight: u64,

        /// Emit every edge in both directions
        #[arg(long)]
        undirected: bool,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command {
        Command::Paths {
            path,
            root,
            lookup,
            limit,
            paths,
        } => cli::paths::paths(path, root, lookup, limit, paths),
        Command::Check {
            variant,
            rounds,
            max_len,
            seed,
            no_progress_bar,
        } => cli::check::check(variant, rounds, max_len, seed, no_progress_bar),
        Command::Generate {
            num_nodes,
            degree,
            max_weight,
            undirected,
            seed,
        } => cli::generate::generate(num_nodes, degree, max_weight, undirected, seed),
    }
}
