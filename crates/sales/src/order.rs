use chrono::NaiveDate;
use serde::Serialize;

use tally_core::{
    CustomerId, Entity, OrderId, OrderStatus, ValidationError, require_non_empty,
    require_non_empty_id,
};
use tally_ingest::SalesRow;

const ENTITY: &str = "order";

/// One validated order line.
///
/// `customer_id` is a lookup key only; the order does not own a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    order_id: OrderId,
    customer_id: CustomerId,
    order_date: NaiveDate,
    product_category: String,
    product_name: String,
    quantity: u32,
    unit_price: f64,
    order_amount: f64,
    status: OrderStatus,
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(ENTITY, field, "is required"))
}

fn non_negative(field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = required(field, value)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(ENTITY, field, "must be >= 0"));
    }
    Ok(value)
}

fn positive_integer(field: &'static str, value: Option<f64>) -> Result<u32, ValidationError> {
    let value = required(field, value)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ValidationError::new(ENTITY, field, "must be an integer"));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(ENTITY, field, "must be > 0"));
    }
    if value > f64::from(u32::MAX) {
        return Err(ValidationError::new(ENTITY, field, "is out of range"));
    }
    Ok(value as u32)
}

impl Order {
    /// Validate a normalized row and build the order from it.
    ///
    /// Checks run in column order; the first violation is reported.
    pub fn from_row(row: &SalesRow) -> Result<Self, ValidationError> {
        let order_id = required("order_id", row.order_id.as_deref())
            .and_then(|v| require_non_empty_id(ENTITY, "order_id", v))?;
        let customer_id = required("customer_id", row.customer_id.as_deref())
            .and_then(|v| require_non_empty_id(ENTITY, "customer_id", v))?;
        let order_date = required("order_date", row.order_date)?;
        let product_category = required("product_category", row.product_category.as_deref())
            .and_then(|v| require_non_empty(ENTITY, "product_category", v))?;
        let product_name = required("product_name", row.product_name.as_deref())
            .and_then(|v| require_non_empty(ENTITY, "product_name", v))?;
        let quantity = positive_integer("quantity", row.quantity)?;
        let unit_price = non_negative("unit_price", row.unit_price)?;
        let order_amount = non_negative("order_amount", row.order_amount)?;
        let status = row.status.known().ok_or_else(|| {
            ValidationError::new(ENTITY, "status", "must be one of: completed/cancelled/pending")
        })?;

        Ok(Self {
            order_id,
            customer_id,
            order_date,
            product_category,
            product_name,
            quantity,
            unit_price,
            order_amount,
            status,
        })
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn product_category(&self) -> &str {
        &self.product_category
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn order_amount(&self) -> f64 {
        self.order_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.order_id
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order(order_id={}, customer_id={}, amount={:.2}, status={})",
            self.order_id, self.customer_id, self.order_amount, self.status
        )
    }
}
