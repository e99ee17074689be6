//! Revenue, order value and customer value aggregates.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use tally_core::CustomerId;
use tally_sales::Order;

use crate::completed;

/// Reported as the top category when there are no completed orders.
pub const NO_CATEGORY: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerValue {
    pub customer_id: CustomerId,
    pub lifetime_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRevenue {
    pub category: String,
    pub product: String,
    pub revenue: f64,
}

/// Descending by value; `tie` decides equal values.
fn desc_then(a: f64, b: f64, tie: Ordering) -> Ordering {
    b.total_cmp(&a).then(tie)
}

/// Sum of `order_amount` over completed orders.
pub fn total_revenue(orders: &[Order]) -> f64 {
    completed(orders).map(Order::order_amount).sum()
}

/// Mean completed amount per order id, summing the lines of multi-line
/// orders first. `None` when nothing is completed.
pub fn average_order_value(orders: &[Order]) -> Option<f64> {
    let mut per_order: BTreeMap<&str, f64> = BTreeMap::new();
    for order in completed(orders) {
        *per_order.entry(order.order_id().as_str()).or_insert(0.0) += order.order_amount();
    }
    if per_order.is_empty() {
        return None;
    }
    Some(per_order.values().sum::<f64>() / per_order.len() as f64)
}

/// Distinct customers across every order, whatever the status.
pub fn unique_customers(orders: &[Order]) -> usize {
    orders
        .iter()
        .map(|order| order.customer_id())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Completed revenue per category, highest first, ties by name.
pub fn revenue_by_category(orders: &[Order]) -> Vec<CategoryRevenue> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for order in completed(orders) {
        *totals.entry(order.product_category()).or_insert(0.0) += order.order_amount();
    }

    let mut ranked: Vec<CategoryRevenue> = totals
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.to_string(),
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| desc_then(a.revenue, b.revenue, a.category.cmp(&b.category)));
    ranked
}

/// The most profitable category, or [`NO_CATEGORY`].
pub fn top_category(by_category: &[CategoryRevenue]) -> &str {
    by_category
        .first()
        .map_or(NO_CATEGORY, |entry| entry.category.as_str())
}

/// Lifetime value of every customer with a completed order, highest first,
/// ties by customer id.
pub fn customer_lifetime_values(orders: &[Order]) -> Vec<CustomerValue> {
    let mut totals: BTreeMap<&CustomerId, f64> = BTreeMap::new();
    for order in completed(orders) {
        *totals.entry(order.customer_id()).or_insert(0.0) += order.order_amount();
    }

    let mut ranked: Vec<CustomerValue> = totals
        .into_iter()
        .map(|(customer_id, lifetime_value)| CustomerValue {
            customer_id: customer_id.clone(),
            lifetime_value,
        })
        .collect();
    ranked.sort_by(|a, b| {
        desc_then(a.lifetime_value, b.lifetime_value, a.customer_id.cmp(&b.customer_id))
    });
    ranked
}

pub fn top_customers(orders: &[Order], n: usize) -> Vec<CustomerValue> {
    let mut ranked = customer_lifetime_values(orders);
    ranked.truncate(n);
    ranked
}

/// Completed revenue per (category, product), highest first, ties by
/// category then product.
pub fn top_products(orders: &[Order], n: usize) -> Vec<ProductRevenue> {
    let mut totals: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for order in completed(orders) {
        *totals
            .entry((order.product_category(), order.product_name()))
            .or_insert(0.0) += order.order_amount();
    }

    let mut ranked: Vec<ProductRevenue> = totals
        .into_iter()
        .map(|((category, product), revenue)| ProductRevenue {
            category: category.to_string(),
            product: product.to_string(),
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| {
        desc_then(
            a.revenue,
            b.revenue,
            a.category.cmp(&b.category).then_with(|| a.product.cmp(&b.product)),
        )
    });
    ranked.truncate(n);
    ranked
}

/// Percentage of customers with more than one distinct completed order id.
pub fn repeat_customer_rate(orders: &[Order]) -> f64 {
    let mut per_customer: BTreeMap<&CustomerId, BTreeSet<&str>> = BTreeMap::new();
    for order in completed(orders) {
        per_customer
            .entry(order.customer_id())
            .or_default()
            .insert(order.order_id().as_str());
    }
    if per_customer.is_empty() {
        return 0.0;
    }
    let repeat = per_customer.values().filter(|ids| ids.len() > 1).count();
    repeat as f64 / per_customer.len() as f64 * 100.0
}
