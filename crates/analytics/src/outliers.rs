//! IQR-based detection of unusually large completed orders.

use serde::Serialize;

use tally_core::{CustomerId, OrderId};
use tally_sales::Order;

use crate::completed;

/// Multiplier applied to the IQR above Q3.
const FENCE: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierOrder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub upper_bound: f64,
    /// Largest amount first; equal amounts keep input order.
    pub outliers: Vec<OutlierOrder>,
}

/// Quantile of an ascending slice with linear interpolation between the two
/// closest ranks. `None` on empty input.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Flag completed orders above `Q3 + 1.5 * IQR`. `None` when nothing is
/// completed.
pub fn detect_outliers(orders: &[Order]) -> Option<OutlierReport> {
    let mut amounts: Vec<f64> = completed(orders).map(Order::order_amount).collect();
    amounts.sort_by(f64::total_cmp);

    let q1 = quantile(&amounts, 0.25)?;
    let q3 = quantile(&amounts, 0.75)?;
    let iqr = q3 - q1;
    let upper_bound = q3 + FENCE * iqr;

    let mut outliers: Vec<OutlierOrder> = completed(orders)
        .filter(|order| order.order_amount() > upper_bound)
        .map(|order| OutlierOrder {
            order_id: order.order_id().clone(),
            customer_id: order.customer_id().clone(),
            amount: order.order_amount(),
        })
        .collect();
    outliers.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    tracing::debug!(q1, q3, upper_bound, flagged = outliers.len(), "computed outlier fence");
    Some(OutlierReport {
        q1,
        q3,
        iqr,
        upper_bound,
        outliers,
    })
}
