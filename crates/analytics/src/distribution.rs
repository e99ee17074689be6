//! Status, quantity and amount distributions.

use std::collections::BTreeMap;

use serde::Serialize;

use tally_core::OrderStatus;
use tally_sales::Order;

use crate::{completed, round2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: OrderStatus,
    pub count: usize,
    /// Share of all orders, in percent, rounded to two decimals.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuantity {
    pub category: String,
    pub average_quantity: f64,
}

/// One equal-width bucket. Every bucket is half-open except the last,
/// which also holds the maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Percentage of orders per status over every order, largest share first.
/// Statuses with no orders are omitted.
pub fn status_distribution(orders: &[Order]) -> Vec<StatusShare> {
    if orders.is_empty() {
        return Vec::new();
    }

    let mut counts: BTreeMap<&'static str, (OrderStatus, usize)> = BTreeMap::new();
    for order in orders {
        let status = order.status();
        counts.entry(status.as_str()).or_insert((status, 0)).1 += 1;
    }

    let total = orders.len() as f64;
    let mut shares: Vec<StatusShare> = counts
        .into_values()
        .map(|(status, count)| StatusShare {
            status,
            count,
            percentage: round2(count as f64 / total * 100.0),
        })
        .collect();
    shares.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.status.as_str().cmp(b.status.as_str()))
    });
    shares
}

/// Mean quantity per category over every order, highest first, ties by name.
pub fn average_quantity_by_category(orders: &[Order]) -> Vec<CategoryQuantity> {
    let mut sums: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for order in orders {
        let entry = sums.entry(order.product_category()).or_insert((0, 0));
        entry.0 += u64::from(order.quantity());
        entry.1 += 1;
    }

    let mut averages: Vec<CategoryQuantity> = sums
        .into_iter()
        .map(|(category, (quantity, lines))| CategoryQuantity {
            category: category.to_string(),
            average_quantity: quantity as f64 / lines as f64,
        })
        .collect();
    averages.sort_by(|a, b| {
        b.average_quantity
            .total_cmp(&a.average_quantity)
            .then_with(|| a.category.cmp(&b.category))
    });
    averages
}

/// Upper bound on histogram bins.
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

/// Equal-width histogram of completed order amounts.
///
/// Returns no bins when `bins` is zero or nothing is completed; at most
/// [`MAX_HISTOGRAM_BINS`] are produced. When every amount is equal the range
/// is widened to `value ± 0.5`.
pub fn amount_histogram(orders: &[Order], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.min(MAX_HISTOGRAM_BINS);
    let amounts: Vec<f64> = completed(orders).map(Order::order_amount).collect();
    if bins == 0 || amounts.is_empty() {
        return Vec::new();
    }

    let min = amounts.iter().copied().fold(f64::INFINITY, f64::min);
    let max = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (high - low) / bins as f64;

    let mut counts = vec![0usize; bins];
    for amount in amounts {
        let index = (((amount - low) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: low + width * i as f64,
            upper: if i + 1 == bins { high } else { low + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{OrderLine, order};
    use tally_ingest::NormalizedStatus;

    fn with_status(order_id: &str, status: NormalizedStatus) -> Order {
        order(OrderLine {
            order_id,
            status,
            ..OrderLine::default()
        })
    }

    #[test]
    fn status_shares_are_rounded_percentages() {
        let orders = vec![
            with_status("O-1", NormalizedStatus::Completed),
            with_status("O-2", NormalizedStatus::Pending),
            with_status("O-3", NormalizedStatus::Pending),
        ];

        let shares = status_distribution(&orders);

        assert_eq!(shares[0].status, OrderStatus::Pending);
        assert_eq!(shares[0].percentage, 66.67);
        assert_eq!(shares[1].percentage, 33.33);
        assert!(status_distribution(&[]).is_empty());
    }

    #[test]
    fn average_quantity_covers_every_status() {
        let orders = vec![
            order(OrderLine {
                order_id: "O-1",
                category: "Books",
                quantity: 1.0,
                ..OrderLine::default()
            }),
            order(OrderLine {
                order_id: "O-2",
                category: "Books",
                quantity: 4.0,
                amount: 40.0,
                status: NormalizedStatus::Cancelled,
                ..OrderLine::default()
            }),
            order(OrderLine {
                order_id: "O-3",
                category: "Toys",
                quantity: 2.0,
                amount: 20.0,
                ..OrderLine::default()
            }),
        ];

        let averages = average_quantity_by_category(&orders);
        assert_eq!(averages[0].category, "Books");
        assert_eq!(averages[0].average_quantity, 2.5);
        assert_eq!(averages[1].average_quantity, 2.0);
    }

    #[test]
    fn histogram_places_maximum_in_last_bin() {
        let orders = crate::fixtures::completed_amounts(&[0.0, 5.0, 9.9, 10.0]);

        let bins = amount_histogram(&orders, 2);

        assert_eq!(bins.len(), 2);
        assert_eq!((bins[0].lower, bins[0].upper, bins[0].count), (0.0, 5.0, 1));
        assert_eq!((bins[1].lower, bins[1].upper, bins[1].count), (5.0, 10.0, 3));
    }

    #[test]
    fn histogram_bins_are_bounded() {
        let orders = crate::fixtures::completed_amounts(&[1.0, 2.0, 3.0]);

        let bins = amount_histogram(&orders, usize::MAX);

        assert_eq!(bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn histogram_handles_flat_and_empty_input() {
        let flat = crate::fixtures::completed_amounts(&[7.0, 7.0]);
        let bins = amount_histogram(&flat, 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(bins[0].lower, 6.5);

        assert!(amount_histogram(&flat, 0).is_empty());
        assert!(amount_histogram(&[], 20).is_empty());
    }
}
