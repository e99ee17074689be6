//! Command-line arguments for the `tally` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use tally_cli::PipelineConfig;
use tally_observability::LogFormat;
use tally_sales::ValidationPolicy;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Clean, validate and analyze a sales table",
    long_about = "Clean and validate a CSV sales table, compute business metrics, \
                  time the custom sort and search routines, and export the results.\n\n\
                  Settings come from defaults, then TALLY_* environment variables, \
                  then these flags."
)]
pub struct Cli {
    /// CSV file with the raw sales table.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for exported tables and reports.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// What to do with rows that fail validation.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, env = "TALLY_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Length of the customer and product rankings.
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Bins in the order amount histogram.
    #[arg(long = "histogram-bins", value_name = "N")]
    pub histogram_bins: Option<usize>,

    /// Maximum number of values sorted by the benchmark.
    #[arg(long = "sort-cap", value_name = "N")]
    pub sort_cap: Option<usize>,

    /// Timed sort trials.
    #[arg(long = "sort-repeats", value_name = "N")]
    pub sort_repeats: Option<usize>,

    /// Timed search trials.
    #[arg(long = "search-repeats", value_name = "N")]
    pub search_repeats: Option<usize>,

    /// Print the summary report to stdout after writing it.
    #[arg(long = "print-summary")]
    pub print_summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Leave failing rows out and count them.
    Exclude,
    /// Stop at the first failing row.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Apply the flags that were given on top of `config`.
    pub fn apply_overrides(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(policy) = self.policy {
            config.validation_policy = match policy {
                PolicyArg::Exclude => ValidationPolicy::ExcludeAndCount,
                PolicyArg::Abort => ValidationPolicy::Abort,
            };
        }
        if let Some(top_n) = self.top_n {
            config.metrics.top_n = top_n;
        }
        if let Some(bins) = self.histogram_bins {
            config.metrics.histogram_bins = bins;
        }
        if let Some(cap) = self.sort_cap {
            config.benchmark.sort_cap = cap;
        }
        if let Some(repeats) = self.sort_repeats {
            config.benchmark.sort_repeats = repeats;
        }
        if let Some(repeats) = self.search_repeats {
            config.benchmark.search_repeats = repeats;
        }
        config
    }
}
