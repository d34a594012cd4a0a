use crate::cli::{self, VariantArg};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use fastrand::Rng;
use heaps::{
    heap::{
        BuildStrategy, Direction, Heap, Max, Min, MinMax, MinMaxHeap, Variant, build_iteratively,
        build_recursively,
    },
    measure_time, record_time,
    utils::human_duration,
};
use indicatif::MultiProgress;
use itertools::Itertools;
use log::{error, info, warn};
use num_format::{Locale, ToFormattedString};
use std::{error::Error, time::Duration};

/// Aggregated results of a check run.
#[derive(Default)]
struct Stats {
    rounds: usize,
    elements: usize,
    build_iterative_violations: usize,
    build_recursive_violations: usize,
    insert_violations: usize,
    extraction_violations: usize,
    max_extraction_violations: usize,
    iterative_durations: Vec<Duration>,
    recursive_durations: Vec<Duration>,
}

impl Stats {
    fn total_violations(&self) -> usize {
        self.build_iterative_violations
            + self.build_recursive_violations
            + self.insert_violations
            + self.extraction_violations
            + self.max_extraction_violations
    }

    fn print_summary(&self, variant: &str, check_max_extraction: bool) {
        let mut table = Table::new();
        table
            .load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Check", "Violations", "Avg time"]);

        let violation_cell = |count: usize| {
            let cell = Cell::new(count.to_formatted_string(&Locale::en));
            if count > 0 {
                cell.fg(Color::Red)
            } else {
                cell.fg(Color::Green)
            }
        };
        let avg = |durations: &[Duration]| {
            if durations.is_empty() {
                "-".to_string()
            } else {
                human_duration(durations.iter().sum::<Duration>() / durations.len() as u32)
            }
        };

        table.add_row(vec![
            Cell::new("build (iterative)"),
            violation_cell(self.build_iterative_violations),
            Cell::new(avg(&self.iterative_durations)),
        ]);
        table.add_row(vec![
            Cell::new("build (recursive)"),
            violation_cell(self.build_recursive_violations),
            Cell::new(avg(&self.recursive_durations)),
        ]);
        table.add_row(vec![
            Cell::new("insert"),
            violation_cell(self.insert_violations),
            Cell::new("-"),
        ]);
        table.add_row(vec![
            Cell::new("remove root"),
            violation_cell(self.extraction_violations),
            Cell::new("-"),
        ]);
        if check_max_extraction {
            table.add_row(vec![
                Cell::new("remove max"),
                violation_cell(self.max_extraction_violations),
                Cell::new("-"),
            ]);
        }

        println!(
            "\n{} heap: {} rounds, {} elements",
            variant,
            self.rounds.to_formatted_string(&Locale::en),
            self.elements.to_formatted_string(&Locale::en)
        );
        println!("{table}");
    }
}

pub fn check(
    variant: VariantArg,
    rounds: usize,
    max_len: usize,
    seed: Option<u64>,
    no_progress_bar: bool,
) -> Result<(), Box<dyn Error>> {
    let progress = cli::init_logging();

    let mut rng = seed.map(Rng::with_seed).unwrap_or_else(Rng::new);
    info!(
        "Checking {:?} heaps: {} rounds of up to {} elements (seed {})",
        variant,
        rounds,
        max_len,
        rng.get_seed()
    );

    let mut stats = Stats::default();
    let mut runner = Runner {
        rng: &mut rng,
        stats: &mut stats,
        max_len,
    };
    let check_max_extraction = variant == VariantArg::MinMax;
    let name = match variant {
        VariantArg::Min => {
            runner.run::<Min>(rounds, &progress, no_progress_bar, None);
            Min::NAME
        }
        VariantArg::Max => {
            runner.run::<Max>(rounds, &progress, no_progress_bar, None);
            Max::NAME
        }
        VariantArg::MinMax => {
            runner.run::<MinMax>(
                rounds,
                &progress,
                no_progress_bar,
                Some(check_max_extraction_order),
            );
            MinMax::NAME
        }
    };

    stats.print_summary(name, check_max_extraction);

    let violations = stats.total_violations();
    if violations > 0 {
        error!("{} heap checks failed", violations);
        return Err(format!("Found {} heap invariant violations", violations).into());
    }
    Ok(())
}

type ExtraCheck = fn(&[i64], &mut Stats);

struct Runner<'a> {
    rng: &'a mut Rng,
    stats: &'a mut Stats,
    max_len: usize,
}

impl Runner<'_> {
    fn run<V: Variant>(
        &mut self,
        rounds: usize,
        progress: &MultiProgress,
        no_progress_bar: bool,
        extra: Option<ExtraCheck>,
    ) {
        if rounds == 0 {
            return;
        }

        // Run the first round to estimate the remaining runtime
        let ((), first_duration) = measure_time!({ self.round::<V>(extra) });

        let remaining = rounds - 1;
        let pb = if !no_progress_bar && cli::should_use_progress_bar(remaining, first_duration) {
            let pb = cli::create_progress_bar(progress, rounds);
            pb.set_position(1); // Account for the first round
            Some(pb)
        } else {
            None
        };

        for _ in 0..remaining {
            self.round::<V>(extra);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = &pb {
            pb.finish_with_message("done");
        }
    }

    fn round<V: Variant>(&mut self, extra: Option<ExtraCheck>) {
        let len = self.rng.usize(0..=self.max_len);
        // Values range over roughly half the length => duplicates
        let spread = (len as i64 / 2).max(1);
        let values = (0..len)
            .map(|_| self.rng.i64(-spread..=spread))
            .collect_vec();

        self.stats.rounds += 1;
        self.stats.elements += len;

        let mut iterative = values.clone();
        record_time!(self.stats.iterative_durations, {
            build_iteratively::<V, _>(&mut iterative, len)
        });
        if let Some(idx) = V::violation(&iterative, len) {
            warn!("Iterative build broke the {} heap at index {}", V::NAME, idx);
            self.stats.build_iterative_violations += 1;
        }

        let mut recursive = values.clone();
        record_time!(self.stats.recursive_durations, {
            build_recursively::<V, _>(&mut recursive, len)
        });
        if let Some(idx) = V::violation(&recursive, len) {
            warn!("Recursive build broke the {} heap at index {}", V::NAME, idx);
            self.stats.build_recursive_violations += 1;
        }

        let mut heap: Heap<i64, V> = Heap::from_vec(recursive, BuildStrategy::Recursive);
        for _ in 0..self.rng.usize(0..=8) {
            let value = self.rng.i64(-spread..=spread);
            heap.insert(value);
            if let Some(idx) = heap.violation() {
                warn!("Inserting {} broke the {} heap at index {}", value, V::NAME, idx);
                self.stats.insert_violations += 1;
            }
        }

        // Roots must come out in order and the last removal must empty the heap
        let expected_len = heap.len();
        let extracted = std::iter::from_fn(|| heap.try_remove_root()).collect_vec();
        let in_order = extracted
            .iter()
            .tuple_windows()
            .all(|(earlier, later)| !V::Root::exceeds(later, earlier));
        if !in_order || extracted.len() != expected_len {
            warn!("{} heap extracted roots out of order: {:?}", V::NAME, extracted);
            self.stats.extraction_violations += 1;
        }

        if let Some(check) = extra {
            check(&values, self.stats);
        }
    }
}

fn check_max_extraction_order(values: &[i64], stats: &mut Stats) {
    let mut heap: MinMaxHeap<i64> = MinMaxHeap::from_vec(values.to_vec(), BuildStrategy::Iterative);
    let extracted = std::iter::from_fn(|| heap.try_remove_max()).collect_vec();

    let in_order = extracted.iter().tuple_windows().all(|(a, b)| a >= b);
    if !in_order || extracted.len() != values.len() || heap.try_find_max().is_some() {
        warn!("min-max heap extracted maxima out of order: {:?}", extracted);
        stats.max_extraction_violations += 1;
    }
}
