use std::time::Duration;

use clap::ValueEnum;
use env_logger::Env;
use heaps::constants::PROGRESS_BAR_THRESHOLD;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;

pub mod check;
pub mod generate;
pub mod paths;

/// How Dijkstra finds a node in the heap after lowering its distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lookup {
    /// Slot to heap index map, updated on every swap
    SlotIndex,
    /// Scan the heap array
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Min,
    Max,
    MinMax,
}

/// Initializes logging from `RUST_LOG` (default: info). Log lines are printed above progress bars.
pub fn init_logging() -> MultiProgress {
    let logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .build();
    let level = logger.filter();

    let progress = MultiProgress::new();
    if let Err(e) = LogWrapper::new(progress.clone(), logger).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }
    log::set_max_level(level);

    progress
}

/// Whether the remaining work takes long enough to be worth a progress bar.
pub fn should_use_progress_bar(remaining: usize, first_duration: Duration) -> bool {
    first_duration.mul_f64(remaining as f64) >= PROGRESS_BAR_THRESHOLD
}

pub fn create_progress_bar(progress: &MultiProgress, len: usize) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");

    let pb = progress.add(ProgressBar::new(len as u64));
    pb.set_style(style);
    pb
}
