//! The batch pipeline: normalize, repair, validate, aggregate, benchmark.
//!
//! Stages run strictly in sequence. Each stage reads the previous stage's
//! output and builds a new value; nothing is mutated in place.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use tally_algorithms::{BenchmarkReport, run_benchmark};
use tally_analytics::BusinessMetrics;
use tally_core::RunId;
use tally_ingest::{CleaningPlan, Dataset, IngestError, RawRecord, StepReport, read_path};
use tally_sales::{BatchAborted, Order, ProductCatalog, ValidatedBatch, validate_orders};

use crate::config::PipelineConfig;
use crate::export::{ExportError, ExportPaths, write_exports};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Aborted(#[from] BatchAborted),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Row counts through ingestion and repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub raw_rows: usize,
    pub duplicates_removed: usize,
    pub cleaning: Vec<StepReport>,
    pub cleaned_rows: usize,
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub run_id: RunId,
    pub config: PipelineConfig,
    pub ingest: IngestSummary,
    pub batch: ValidatedBatch,
    pub catalog: ProductCatalog,
    pub metrics: BusinessMetrics,
    pub benchmark: BenchmarkReport,
}

impl PipelineOutput {
    pub fn orders(&self) -> &[Order] {
        &self.batch.orders
    }
}

/// Read a CSV file and run the pipeline over it.
pub fn run_path(path: &Path, config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let run_id = RunId::new();
    let span = tracing::info_span!("pipeline", %run_id);
    let _guard = span.enter();

    tracing::info!(path = %path.display(), "reading sales table");
    let records = read_path(path)?;
    run_records_with_id(run_id, &records, config)
}

/// Run the pipeline over a CSV file and write the export artifacts into `dir`.
pub fn run_and_export(
    path: &Path,
    config: &PipelineConfig,
    dir: &Path,
) -> Result<(PipelineOutput, ExportPaths), PipelineError> {
    let output = run_path(path, config)?;
    let paths = write_exports(&output, dir)?;
    Ok((output, paths))
}

/// Run the pipeline over already-read raw records.
pub fn run_records(
    records: &[RawRecord],
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let run_id = RunId::new();
    let span = tracing::info_span!("pipeline", %run_id);
    let _guard = span.enter();

    run_records_with_id(run_id, records, config)
}

fn run_records_with_id(
    run_id: RunId,
    records: &[RawRecord],
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let config = config.clamped();
    let (cleaned, ingest) = tracing::info_span!("clean").in_scope(|| clean(records));

    let batch = tracing::info_span!("validate")
        .in_scope(|| validate_orders(&cleaned, config.validation_policy))?;

    let (catalog, metrics) = tracing::info_span!("aggregate").in_scope(|| {
        let catalog = ProductCatalog::from_orders(&batch.orders);
        let metrics = BusinessMetrics::compute(&batch.orders, &config.metrics);
        (catalog, metrics)
    });

    let benchmark = tracing::info_span!("benchmark").in_scope(|| {
        let amounts: Vec<f64> = batch.orders.iter().map(Order::order_amount).collect();
        run_benchmark(&amounts, &config.benchmark)
    });

    tracing::info!(
        raw_rows = ingest.raw_rows,
        orders = batch.orders.len(),
        rejected = batch.rejected_count(),
        products = catalog.len(),
        "pipeline finished"
    );

    Ok(PipelineOutput {
        run_id,
        config,
        ingest,
        batch,
        catalog,
        metrics,
        benchmark,
    })
}

fn clean(records: &[RawRecord]) -> (Dataset, IngestSummary) {
    let normalized = Dataset::from_raw(records);
    let deduplicated = normalized.deduplicate();
    let duplicates_removed = normalized.len() - deduplicated.len();
    if duplicates_removed > 0 {
        tracing::info!(duplicates_removed, "removed duplicate rows");
    }

    let (cleaned, cleaning) = CleaningPlan::standard().apply(&deduplicated);
    let summary = IngestSummary {
        raw_rows: records.len(),
        duplicates_removed,
        cleaning,
        cleaned_rows: cleaned.len(),
    };
    (cleaned, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_sales::ValidationPolicy;

    fn record(order_id: &str, quantity: &str, amount: &str, status: &str) -> RawRecord {
        RawRecord {
            order_id: Some(order_id.to_string()),
            customer_id: Some("C-1".to_string()),
            order_date: Some("2024-02-03".to_string()),
            product_category: Some("Books".to_string()),
            product_name: Some("Atlas".to_string()),
            quantity: Some(quantity.to_string()),
            unit_price: Some(amount.to_string()),
            order_amount: Some(amount.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn counts_rows_through_each_stage() {
        let records = vec![
            record("O-1", "1", "$10.00", "Complete"),
            record("O-1", "1", "$10.00", "Complete"),
            record("O-2", "1", "20", "weird"),
            record("O-3", "1", "", "done"),
            record("O-4", "0", "5", "pending"),
        ];

        let output = run_records(&records, &PipelineConfig::default()).unwrap();

        assert_eq!(output.ingest.raw_rows, 5);
        assert_eq!(output.ingest.duplicates_removed, 1);
        // O-3 has no amount
        assert_eq!(output.ingest.cleaned_rows, 3);
        assert_eq!(output.orders().len(), 2);
        assert_eq!(output.batch.rejected_count(), 1);
        assert_eq!(output.metrics.total_revenue, 10.0);
        assert_eq!(output.catalog.len(), 1);
        assert!(matches!(output.benchmark, BenchmarkReport::Insufficient(_)));
    }

    #[test]
    fn abort_policy_surfaces_the_failing_row() {
        let config = PipelineConfig {
            validation_policy: ValidationPolicy::Abort,
            ..PipelineConfig::default()
        };
        let records = vec![
            record("O-1", "1", "10", "completed"),
            record("O-2", "2.5", "10", "completed"),
        ];

        match run_records(&records, &config) {
            Err(PipelineError::Aborted(aborted)) => {
                assert_eq!(aborted.row, 1);
                assert_eq!(aborted.error.field, "quantity");
            }
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn oversized_histogram_is_clamped() {
        let mut config = PipelineConfig::default();
        config.metrics.histogram_bins = usize::MAX;
        let records = vec![
            record("O-1", "1", "10", "completed"),
            record("O-2", "1", "30", "completed"),
        ];

        let output = run_records(&records, &config).unwrap();

        assert_eq!(output.config.metrics.histogram_bins, tally_analytics::MAX_HISTOGRAM_BINS);
        let counted: usize = output.metrics.amount_histogram.iter().map(|bin| bin.count).sum();
        assert_eq!(counted, 2);
    }
}
