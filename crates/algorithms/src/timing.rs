//! Timing of the hand-written algorithms against their standard-library
//! counterparts.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use tally_core::InsufficientData;

use crate::search::binary_search;
use crate::sort::merge_sort;

fn as_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Total wall time of both sides over the same number of trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingComparison {
    pub repeats: usize,
    #[serde(serialize_with = "as_seconds")]
    pub custom: Duration,
    #[serde(serialize_with = "as_seconds")]
    pub builtin: Duration,
    /// `custom / builtin`; infinite when the builtin side measured zero.
    pub ratio: f64,
}

impl TimingComparison {
    pub fn new(repeats: usize, custom: Duration, builtin: Duration) -> Self {
        let ratio = if builtin.is_zero() {
            f64::INFINITY
        } else {
            custom.as_secs_f64() / builtin.as_secs_f64()
        };
        Self {
            repeats,
            custom,
            builtin,
            ratio,
        }
    }
}

/// Time `merge_sort` against `sort_by(total_cmp)`.
///
/// Each trial sorts its own fresh copy of `data`; the copy is made outside
/// the timed region.
pub fn compare_sort_timing(data: &[f64], repeats: usize) -> TimingComparison {
    let mut custom = Duration::ZERO;
    let mut builtin = Duration::ZERO;

    for _ in 0..repeats {
        let input = data.to_vec();
        let started = Instant::now();
        black_box(merge_sort(black_box(&input)));
        custom += started.elapsed();

        let mut input = data.to_vec();
        let started = Instant::now();
        black_box(&mut input).sort_by(f64::total_cmp);
        builtin += started.elapsed();
        black_box(&input);
    }

    TimingComparison::new(repeats, custom, builtin)
}

/// Time [`binary_search`] against `binary_search_by(total_cmp)` on an
/// ascending slice.
pub fn compare_search_timing(sorted: &[f64], target: f64, repeats: usize) -> TimingComparison {
    let started = Instant::now();
    for _ in 0..repeats {
        black_box(binary_search(black_box(sorted), black_box(&target)));
    }
    let custom = started.elapsed();

    let started = Instant::now();
    for _ in 0..repeats {
        black_box(
            black_box(sorted)
                .binary_search_by(|candidate| candidate.total_cmp(black_box(&target)))
                .ok(),
        );
    }
    let builtin = started.elapsed();

    TimingComparison::new(repeats, custom, builtin)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchmarkConfig {
    /// Only the first `sort_cap` values are sorted.
    pub sort_cap: usize,
    pub sort_repeats: usize,
    pub search_repeats: usize,
    /// Fewer values than this yields no timings.
    pub min_samples: usize,
    /// Ceiling applied to both repeat counts.
    pub max_repeats: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sort_cap: 2000,
            sort_repeats: 3,
            search_repeats: 2000,
            min_samples: 10,
            max_repeats: 10_000,
        }
    }
}

impl BenchmarkConfig {
    /// Repeat counts within `1..=max_repeats` and a sort cap of at least one.
    pub fn clamped(self) -> Self {
        let ceiling = self.max_repeats.max(1);
        Self {
            sort_cap: self.sort_cap.max(1),
            sort_repeats: self.sort_repeats.clamp(1, ceiling),
            search_repeats: self.search_repeats.clamp(1, ceiling),
            min_samples: self.min_samples,
            max_repeats: ceiling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BenchmarkReport {
    Completed {
        sample_size: usize,
        sort_size: usize,
        sort: TimingComparison,
        /// The median of the sorted values.
        search_target: f64,
        search: TimingComparison,
    },
    Insufficient(InsufficientData),
}

/// Time sorting and searching over `values`.
///
/// `values` is only read; every trial works on private copies.
pub fn run_benchmark(values: &[f64], config: &BenchmarkConfig) -> BenchmarkReport {
    let config = config.clamped();
    if values.len() < config.min_samples {
        tracing::info!(
            values = values.len(),
            required = config.min_samples,
            "not enough data for timing comparisons"
        );
        return BenchmarkReport::Insufficient(InsufficientData::new(
            "algorithm benchmark",
            config.min_samples,
            values.len(),
        ));
    }

    let sort_input = &values[..values.len().min(config.sort_cap)];
    let sort = compare_sort_timing(sort_input, config.sort_repeats);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let search_target = sorted[sorted.len() / 2];
    let search = compare_search_timing(&sorted, search_target, config.search_repeats);

    tracing::info!(
        sort_size = sort_input.len(),
        sort_ratio = sort.ratio,
        search_ratio = search.ratio,
        "benchmark complete"
    );
    BenchmarkReport::Completed {
        sample_size: values.len(),
        sort_size: sort_input.len(),
        sort,
        search_target,
        search,
    }
}
