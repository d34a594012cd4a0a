use std::time::Duration;

/// Minimal runtime after which to show a progress bar instead of simple log messages.
pub const PROGRESS_BAR_THRESHOLD: Duration = Duration::from_millis(500);

/// Largest node count a graph file may declare. Nodes are allocated up front.
pub const MAX_NODES: usize = 1 << 26;

/// Upper bound on the children and grandchildren of a single heap node.
pub const MAX_FAMILY: usize = 6;
