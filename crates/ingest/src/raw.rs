//! Raw sales rows exactly as read from the tabular source.

use serde::{Deserialize, Serialize};

/// Input columns, in canonical order.
pub const COLUMNS: [&str; 9] = [
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

/// One untyped input row. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub order_date: Option<String>,
    pub product_category: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub order_amount: Option<String>,
    pub status: Option<String>,
}
