//! Monthly revenue trend.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use tally_sales::Order;

use crate::completed;

/// A calendar month; orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl core::fmt::Display for Month {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub month: Month,
    pub revenue: f64,
    /// Percent change from the previous month with revenue. Absent for the
    /// first month and when the previous month's revenue was zero.
    pub growth_pct: Option<f64>,
}

/// Completed revenue per calendar month, oldest first.
pub fn monthly_trend(orders: &[Order]) -> Vec<MonthlyRevenue> {
    let mut totals: BTreeMap<Month, f64> = BTreeMap::new();
    for order in completed(orders) {
        *totals.entry(Month::of(order.order_date())).or_insert(0.0) += order.order_amount();
    }

    let mut previous: Option<f64> = None;
    totals
        .into_iter()
        .map(|(month, revenue)| {
            let growth_pct = previous
                .filter(|prior| *prior != 0.0)
                .map(|prior| (revenue - prior) / prior * 100.0);
            previous = Some(revenue);
            MonthlyRevenue {
                month,
                revenue,
                growth_pct,
            }
        })
        .collect()
}
