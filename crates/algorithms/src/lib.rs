//! `tally-algorithms`: hand-written sort and search, and a harness that
//! times them against the standard library.

pub mod search;
pub mod sort;
pub mod timing;

pub use search::{binary_search, linear_search};
pub use sort::merge_sort;
pub use timing::{
    BenchmarkConfig, BenchmarkReport, TimingComparison, compare_search_timing,
    compare_sort_timing, run_benchmark,
};
