//! The full set of business aggregates for one batch.

use serde::Serialize;

use tally_sales::Order;

use crate::distribution::{
    CategoryQuantity, HistogramBin, MAX_HISTOGRAM_BINS, StatusShare, amount_histogram,
    average_quantity_by_category, status_distribution,
};
use crate::outliers::{OutlierReport, detect_outliers};
use crate::revenue::{
    CategoryRevenue, CustomerValue, ProductRevenue, average_order_value, repeat_customer_rate,
    revenue_by_category, top_category, top_customers, top_products, total_revenue,
    unique_customers,
};
use crate::segmentation::{Segmentation, segment_customers};
use crate::trend::{MonthlyRevenue, monthly_trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsConfig {
    /// Length of the customer and product rankings.
    pub top_n: usize,
    pub histogram_bins: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            histogram_bins: 20,
        }
    }
}

impl MetricsConfig {
    /// Histogram bins capped at [`MAX_HISTOGRAM_BINS`].
    pub fn clamped(self) -> Self {
        Self {
            top_n: self.top_n,
            histogram_bins: self.histogram_bins.min(MAX_HISTOGRAM_BINS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessMetrics {
    pub order_lines: usize,
    pub completed_lines: usize,
    pub unique_customers: usize,
    pub total_revenue: f64,
    /// `None` when no order is completed.
    pub average_order_value: Option<f64>,
    pub top_category: String,
    pub repeat_customer_rate: f64,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub top_customers: Vec<CustomerValue>,
    pub top_products: Vec<ProductRevenue>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub status_distribution: Vec<StatusShare>,
    pub average_quantity_by_category: Vec<CategoryQuantity>,
    pub outliers: Option<OutlierReport>,
    pub segmentation: Segmentation,
    pub amount_histogram: Vec<HistogramBin>,
}

impl BusinessMetrics {
    pub fn compute(orders: &[Order], config: &MetricsConfig) -> Self {
        let config = config.clamped();
        let revenue_by_category = revenue_by_category(orders);
        let metrics = Self {
            order_lines: orders.len(),
            completed_lines: crate::completed(orders).count(),
            unique_customers: unique_customers(orders),
            total_revenue: total_revenue(orders),
            average_order_value: average_order_value(orders),
            top_category: top_category(&revenue_by_category).to_string(),
            repeat_customer_rate: repeat_customer_rate(orders),
            top_customers: top_customers(orders, config.top_n),
            top_products: top_products(orders, config.top_n),
            monthly_revenue: monthly_trend(orders),
            status_distribution: status_distribution(orders),
            average_quantity_by_category: average_quantity_by_category(orders),
            outliers: detect_outliers(orders),
            segmentation: segment_customers(orders),
            amount_histogram: amount_histogram(orders, config.histogram_bins),
            revenue_by_category,
        };

        tracing::info!(
            orders = metrics.order_lines,
            completed = metrics.completed_lines,
            total_revenue = metrics.total_revenue,
            top_category = %metrics.top_category,
            "computed business metrics"
        );
        metrics
    }
}
