//! Missing-value repair passes.
//!
//! A closed set of dataset transforms. [`CleaningPlan::standard`] runs them
//! in the one supported order: fill status first, then drop incomplete rows.
//! Reversing the order would discard rows whose only gap is the status.

use serde::Serialize;

use crate::dataset::{Dataset, SalesRow};
use crate::normalize::NormalizedStatus;

/// A single dataset-level repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueStrategy {
    /// Rows with an unknown or missing status become `pending`.
    FillStatus,
    /// Rows missing any critical field are removed.
    DropCritical,
}

impl MissingValueStrategy {
    pub fn name(self) -> &'static str {
        match self {
            MissingValueStrategy::FillStatus => "fill_status",
            MissingValueStrategy::DropCritical => "drop_critical",
        }
    }

    /// Apply the pass, returning a new dataset.
    pub fn apply(self, dataset: &Dataset) -> Dataset {
        match self {
            MissingValueStrategy::FillStatus => dataset.map(fill_status),
            MissingValueStrategy::DropCritical => dataset.filter(SalesRow::is_complete),
        }
    }
}

fn fill_status(row: &SalesRow) -> SalesRow {
    let mut filled = row.clone();
    if filled.status == NormalizedStatus::Unknown {
        filled.status = NormalizedStatus::Pending;
    }
    filled
}

/// What one pass did to the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub strategy: MissingValueStrategy,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows whose content the pass changed.
    pub rows_changed: usize,
}

/// Ordered sequence of repair passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningPlan {
    steps: Vec<MissingValueStrategy>,
}

impl CleaningPlan {
    /// Fill status, then drop rows missing a critical field.
    pub fn standard() -> Self {
        Self {
            steps: vec![
                MissingValueStrategy::FillStatus,
                MissingValueStrategy::DropCritical,
            ],
        }
    }

    pub fn steps(&self) -> &[MissingValueStrategy] {
        &self.steps
    }

    /// Run every pass in order.
    pub fn apply(&self, dataset: &Dataset) -> (Dataset, Vec<StepReport>) {
        let mut current = dataset.clone();
        let mut reports = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let next = step.apply(&current);
            let rows_changed = match step {
                MissingValueStrategy::FillStatus => current
                    .rows()
                    .iter()
                    .zip(next.rows())
                    .filter(|(before, after)| before != after)
                    .count(),
                MissingValueStrategy::DropCritical => current.len() - next.len(),
            };
            let report = StepReport {
                strategy: *step,
                rows_in: current.len(),
                rows_out: next.len(),
                rows_changed,
            };
            tracing::debug!(
                strategy = step.name(),
                rows_in = report.rows_in,
                rows_out = report.rows_out,
                rows_changed = report.rows_changed,
                "applied missing-value strategy"
            );
            reports.push(report);
            current = next;
        }

        (current, reports)
    }
}

impl Default for CleaningPlan {
    fn default() -> Self {
        Self::standard()
    }
}
