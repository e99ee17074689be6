//! `tally-analytics`: business metrics over validated orders.
//!
//! Pure, deterministic aggregation: groupings use ordered maps and every
//! ranking carries an explicit tie-break, so the same orders always produce
//! the same output. Unless a function says otherwise it only looks at
//! completed orders.

pub mod distribution;
pub mod metrics;
pub mod outliers;
pub mod revenue;
pub mod segmentation;
pub mod trend;

pub use distribution::{
    CategoryQuantity, HistogramBin, MAX_HISTOGRAM_BINS, StatusShare, amount_histogram,
    average_quantity_by_category, status_distribution,
};
pub use metrics::{BusinessMetrics, MetricsConfig};
pub use outliers::{OutlierOrder, OutlierReport, detect_outliers, quantile};
pub use revenue::{
    CategoryRevenue, CustomerValue, NO_CATEGORY, ProductRevenue, average_order_value,
    customer_lifetime_values, repeat_customer_rate, revenue_by_category, top_category,
    top_customers, top_products, total_revenue, unique_customers,
};
pub use segmentation::{Segmentation, Tier, TierAssignment, TierCount, segment_customers};
pub use trend::{Month, MonthlyRevenue, monthly_trend};

use tally_sales::Order;

fn completed(orders: &[Order]) -> impl Iterator<Item = &Order> {
    orders.iter().filter(|order| order.is_completed())
}

/// Round to two decimals for percentage reporting.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
