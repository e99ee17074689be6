//! Batch validation of normalized rows into orders.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tally_core::ValidationError;
use tally_ingest::Dataset;

use crate::order::Order;

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Leave the row out, log it and count it.
    #[default]
    ExcludeAndCount,
    /// Stop the run at the first failing row.
    Abort,
}

impl ValidationPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationPolicy::ExcludeAndCount => "exclude",
            ValidationPolicy::Abort => "abort",
        }
    }
}

impl core::fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exclude" | "exclude_and_count" => Ok(ValidationPolicy::ExcludeAndCount),
            "abort" => Ok(ValidationPolicy::Abort),
            other => Err(format!("unknown validation policy '{other}' (expected exclude|abort)")),
        }
    }
}

/// A row left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// Zero-based position in the validated dataset.
    pub row: usize,
    pub entity: &'static str,
    pub field: &'static str,
    pub constraint: String,
}

impl RejectedRow {
    fn new(row: usize, error: ValidationError) -> Self {
        Self {
            row,
            entity: error.entity,
            field: error.field,
            constraint: error.constraint,
        }
    }
}

/// Orders that passed validation plus the rows that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    pub orders: Vec<Order>,
    pub rejected: Vec<RejectedRow>,
}

impl ValidatedBatch {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Rejection counts per offending field.
    pub fn rejections_by_field(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for rejected in &self.rejected {
            *counts.entry(rejected.field).or_insert(0) += 1;
        }
        counts
    }
}

/// Validation stopped the run under [`ValidationPolicy::Abort`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation aborted at row {row}: {error}")]
pub struct BatchAborted {
    pub row: usize,
    #[source]
    pub error: ValidationError,
}

/// Validate every row of `dataset` into an [`Order`].
pub fn validate_orders(
    dataset: &Dataset,
    policy: ValidationPolicy,
) -> Result<ValidatedBatch, BatchAborted> {
    let mut batch = ValidatedBatch {
        orders: Vec::with_capacity(dataset.len()),
        rejected: Vec::new(),
    };

    for (row, sales_row) in dataset.rows().iter().enumerate() {
        match Order::from_row(sales_row) {
            Ok(order) => batch.orders.push(order),
            Err(error) => match policy {
                ValidationPolicy::Abort => {
                    tracing::error!(row, error = %error, "validation failed; aborting batch");
                    return Err(BatchAborted { row, error });
                }
                ValidationPolicy::ExcludeAndCount => {
                    tracing::warn!(row, error = %error, "excluding invalid row");
                    batch.rejected.push(RejectedRow::new(row, error));
                }
            },
        }
    }

    tracing::info!(
        valid = batch.orders.len(),
        rejected = batch.rejected.len(),
        policy = %policy,
        "validated order batch"
    );
    Ok(batch)
}
