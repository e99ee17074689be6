//! Normalized, still-unvalidated sales rows.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::{NormalizedStatus, normalize_status, parse_date, parse_money, parse_quantity};
use crate::raw::RawRecord;

/// A row after field normalization. `None` marks a missing or unparseable
/// value; status uses [`NormalizedStatus::Unknown`] for the same purpose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRow {
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub product_category: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub order_amount: Option<f64>,
    pub status: NormalizedStatus,
}

/// Fields a row cannot be used without.
pub const CRITICAL_FIELDS: [&str; 9] = [
    "order_id",
    "customer_id",
    "order_date",
    "product_category",
    "product_name",
    "quantity",
    "unit_price",
    "order_amount",
    "status",
];

impl SalesRow {
    /// Normalize every field of a raw row.
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            order_id: text(&raw.order_id),
            customer_id: text(&raw.customer_id),
            order_date: raw.order_date.as_deref().and_then(parse_date),
            product_category: text(&raw.product_category),
            product_name: text(&raw.product_name),
            quantity: raw.quantity.as_deref().and_then(parse_quantity),
            unit_price: raw.unit_price.as_deref().and_then(|v| parse_money(v)),
            order_amount: raw.order_amount.as_deref().and_then(|v| parse_money(v)),
            status: raw
                .status
                .as_deref()
                .map(normalize_status)
                .unwrap_or(NormalizedStatus::Unknown),
        }
    }

    /// Names of critical fields that are missing, in [`CRITICAL_FIELDS`] order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.order_id.is_some(),
            self.customer_id.is_some(),
            self.order_date.is_some(),
            self.product_category.is_some(),
            self.product_name.is_some(),
            self.quantity.is_some(),
            self.unit_price.is_some(),
            self.order_amount.is_some(),
            self.status != NormalizedStatus::Unknown,
        ];
        CRITICAL_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn dedup_key(&self) -> RowKey {
        RowKey {
            order_id: self.order_id.clone(),
            customer_id: self.customer_id.clone(),
            order_date: self.order_date,
            product_category: self.product_category.clone(),
            product_name: self.product_name.clone(),
            quantity: self.quantity.map(f64::to_bits),
            unit_price: self.unit_price.map(f64::to_bits),
            order_amount: self.order_amount.map(f64::to_bits),
            status: self.status,
        }
    }
}

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Hashable identity of a row (floats compared bitwise).
#[derive(Debug, PartialEq, Eq, Hash)]
struct RowKey {
    order_id: Option<String>,
    customer_id: Option<String>,
    order_date: Option<NaiveDate>,
    product_category: Option<String>,
    product_name: Option<String>,
    quantity: Option<u64>,
    unit_price: Option<u64>,
    order_amount: Option<u64>,
    status: NormalizedStatus,
}

/// An immutable batch of normalized rows.
///
/// Transformations return a new dataset and leave `self` untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<SalesRow>,
}

impl Dataset {
    pub fn new(rows: Vec<SalesRow>) -> Self {
        Self { rows }
    }

    /// Normalize a batch of raw rows.
    pub fn from_raw(records: &[RawRecord]) -> Self {
        Self::new(records.iter().map(SalesRow::from_raw).collect())
    }

    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop exact duplicate rows, keeping the first occurrence.
    pub fn deduplicate(&self) -> Dataset {
        let mut seen = HashSet::with_capacity(self.rows.len());
        let rows: Vec<SalesRow> = self
            .rows
            .iter()
            .filter(|row| seen.insert(row.dedup_key()))
            .cloned()
            .collect();
        Dataset::new(rows)
    }

    /// Keep rows matching `predicate`.
    pub fn filter(&self, predicate: impl Fn(&SalesRow) -> bool) -> Dataset {
        Dataset::new(self.rows.iter().filter(|&row| predicate(row)).cloned().collect())
    }

    /// Transform every row.
    pub fn map(&self, f: impl Fn(&SalesRow) -> SalesRow) -> Dataset {
        Dataset::new(self.rows.iter().map(f).collect())
    }
}

impl FromIterator<SalesRow> for Dataset {
    fn from_iter<T: IntoIterator<Item = SalesRow>>(iter: T) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}
