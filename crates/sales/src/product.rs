use serde::Serialize;

use tally_core::{Entity, ProductId, ValidationError, require_non_empty, require_non_empty_id};
use tally_ingest::{RawValue, parse_money};

const ENTITY: &str = "product";

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    base_price: f64,
}

impl Product {
    /// Validate and build a product. `base_price` may be numeric or text
    /// (`"$12.50"`); it must coerce to a number `>= 0`.
    pub fn new<'a>(
        id: &str,
        name: &str,
        category: &str,
        base_price: impl Into<RawValue<'a>>,
    ) -> Result<Self, ValidationError> {
        let id = require_non_empty_id(ENTITY, "id", id)?;
        let name = require_non_empty(ENTITY, "name", name)?;
        let category = require_non_empty(ENTITY, "category", category)?;
        let base_price = parse_money(base_price)
            .ok_or_else(|| ValidationError::new(ENTITY, "base_price", "must be numeric"))?;
        if base_price < 0.0 {
            return Err(ValidationError::new(ENTITY, "base_price", "must be >= 0"));
        }

        Ok(Self {
            id,
            name,
            category,
            base_price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Product(id={})", self.id)
    }
}
