//! Writes the run's tables, metrics bundle and summary report to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use tally_algorithms::BenchmarkReport;
use tally_analytics::BusinessMetrics;
use tally_core::RunId;
use tally_sales::RejectedRow;

use crate::config::PipelineConfig;
use crate::pipeline::{IngestSummary, PipelineOutput};
use crate::report::render_summary;

pub const CLEAN_ORDERS_FILE: &str = "sales_clean.csv";
pub const TOP_CUSTOMERS_FILE: &str = "top_customers.csv";
pub const TOP_PRODUCTS_FILE: &str = "top_products.csv";
pub const METRICS_FILE: &str = "metrics.json";
pub const SUMMARY_FILE: &str = "summary_report.txt";

const ORDER_HEADERS: [&str; 9] = tally_ingest::COLUMNS;
const CUSTOMER_HEADERS: [&str; 2] = ["customer_id", "lifetime_value"];
const PRODUCT_HEADERS: [&str; 3] = ["category", "product", "revenue"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode metrics: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where each export landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPaths {
    pub clean_orders: PathBuf,
    pub top_customers: PathBuf,
    pub top_products: PathBuf,
    pub metrics: PathBuf,
    pub summary: PathBuf,
}

impl ExportPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            clean_orders: dir.join(CLEAN_ORDERS_FILE),
            top_customers: dir.join(TOP_CUSTOMERS_FILE),
            top_products: dir.join(TOP_PRODUCTS_FILE),
            metrics: dir.join(METRICS_FILE),
            summary: dir.join(SUMMARY_FILE),
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationSummary<'a> {
    valid_orders: usize,
    rejected_rows: usize,
    rejections_by_field: BTreeMap<&'static str, usize>,
    rejected: &'a [RejectedRow],
}

/// Contents of `metrics.json`.
#[derive(Debug, Serialize)]
struct MetricsDocument<'a> {
    run_id: RunId,
    generated_at: DateTime<Utc>,
    config: &'a PipelineConfig,
    ingest: &'a IngestSummary,
    validation: ValidationSummary<'a>,
    catalog_products: usize,
    metrics: &'a BusinessMetrics,
    benchmark: &'a BenchmarkReport,
}

/// Write every export into `dir`, creating it if needed.
pub fn write_exports(output: &PipelineOutput, dir: &Path) -> Result<ExportPaths, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let paths = ExportPaths::in_dir(dir);

    write_csv(&paths.clean_orders, &ORDER_HEADERS, output.orders())?;
    write_csv(&paths.top_customers, &CUSTOMER_HEADERS, &output.metrics.top_customers)?;
    write_csv(&paths.top_products, &PRODUCT_HEADERS, &output.metrics.top_products)?;

    let document = MetricsDocument {
        run_id: output.run_id,
        generated_at: Utc::now(),
        config: &output.config,
        ingest: &output.ingest,
        validation: ValidationSummary {
            valid_orders: output.batch.orders.len(),
            rejected_rows: output.batch.rejected_count(),
            rejections_by_field: output.batch.rejections_by_field(),
            rejected: &output.batch.rejected,
        },
        catalog_products: output.catalog.len(),
        metrics: &output.metrics,
        benchmark: &output.benchmark,
    };
    write_file(&paths.metrics, serde_json::to_string_pretty(&document)?)?;
    write_file(&paths.summary, render_summary(output, Some(&paths)))?;

    tracing::info!(dir = %dir.display(), "wrote exports");
    Ok(paths)
}

/// One CSV row per item. The header is written even when `rows` is empty.
fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<(), ExportError> {
    let csv_error = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!rows.is_empty())
        .from_path(path)
        .map_err(csv_error)?;
    if rows.is_empty() {
        writer.write_record(headers).map_err(csv_error)?;
    }
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote csv");
    Ok(())
}

fn write_file(path: &Path, contents: String) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
