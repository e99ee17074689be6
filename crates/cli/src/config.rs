//! Pipeline configuration: defaults, then environment, then flags.

use core::fmt::Display;
use core::str::FromStr;

use serde::Serialize;

use tally_algorithms::BenchmarkConfig;
use tally_analytics::MetricsConfig;
use tally_sales::ValidationPolicy;

pub const ENV_VALIDATION_POLICY: &str = "TALLY_VALIDATION_POLICY";
pub const ENV_TOP_N: &str = "TALLY_TOP_N";
pub const ENV_HISTOGRAM_BINS: &str = "TALLY_HISTOGRAM_BINS";
pub const ENV_SORT_CAP: &str = "TALLY_SORT_CAP";
pub const ENV_SORT_REPEATS: &str = "TALLY_SORT_REPEATS";
pub const ENV_SEARCH_REPEATS: &str = "TALLY_SEARCH_REPEATS";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    pub validation_policy: ValidationPolicy,
    pub metrics: MetricsConfig,
    pub benchmark: BenchmarkConfig,
}

impl PipelineConfig {
    /// Bins and benchmark settings brought within their limits.
    pub fn clamped(self) -> Self {
        Self {
            validation_policy: self.validation_policy,
            metrics: self.metrics.clamped(),
            benchmark: self.benchmark.clamped(),
        }
    }

    /// Defaults overridden by `TALLY_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`PipelineConfig::from_env`] with an injectable variable source.
    /// Unparseable values are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let setting = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            validation_policy: parse_or(
                ENV_VALIDATION_POLICY,
                setting(ENV_VALIDATION_POLICY),
                defaults.validation_policy,
            ),
            metrics: MetricsConfig {
                top_n: parse_or(ENV_TOP_N, setting(ENV_TOP_N), defaults.metrics.top_n),
                histogram_bins: parse_or(
                    ENV_HISTOGRAM_BINS,
                    setting(ENV_HISTOGRAM_BINS),
                    defaults.metrics.histogram_bins,
                ),
            },
            benchmark: BenchmarkConfig {
                sort_cap: parse_or(
                    ENV_SORT_CAP,
                    setting(ENV_SORT_CAP),
                    defaults.benchmark.sort_cap,
                ),
                sort_repeats: parse_or(
                    ENV_SORT_REPEATS,
                    setting(ENV_SORT_REPEATS),
                    defaults.benchmark.sort_repeats,
                ),
                search_repeats: parse_or(
                    ENV_SEARCH_REPEATS,
                    setting(ENV_SEARCH_REPEATS),
                    defaults.benchmark.search_repeats,
                ),
                ..defaults.benchmark
            },
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                %key,
                value = %raw,
                error = %err,
                %default,
                "invalid setting; using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = PipelineConfig::from_lookup(lookup(&[]));

        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.validation_policy, ValidationPolicy::ExcludeAndCount);
        assert_eq!(config.metrics.top_n, 10);
        assert_eq!(config.metrics.histogram_bins, 20);
        assert_eq!(config.benchmark.sort_cap, 2000);
        assert_eq!(config.benchmark.sort_repeats, 3);
        assert_eq!(config.benchmark.search_repeats, 2000);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (ENV_VALIDATION_POLICY, "abort"),
            (ENV_TOP_N, "5"),
            (ENV_SORT_CAP, " 100 "),
        ]));

        assert_eq!(config.validation_policy, ValidationPolicy::Abort);
        assert_eq!(config.metrics.top_n, 5);
        assert_eq!(config.benchmark.sort_cap, 100);
        assert_eq!(config.benchmark.min_samples, 10);
    }

    #[test]
    fn oversized_values_are_clamped() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (ENV_HISTOGRAM_BINS, "18446744073709551615"),
            (ENV_SEARCH_REPEATS, "99999999"),
        ]))
        .clamped();

        assert_eq!(config.metrics.histogram_bins, tally_analytics::MAX_HISTOGRAM_BINS);
        assert_eq!(config.benchmark.search_repeats, config.benchmark.max_repeats);
        assert_eq!(PipelineConfig::default().clamped(), PipelineConfig::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (ENV_VALIDATION_POLICY, "ignore"),
            (ENV_HISTOGRAM_BINS, "-3"),
            (ENV_SEARCH_REPEATS, ""),
        ]));

        assert_eq!(config, PipelineConfig::default());
    }
}
