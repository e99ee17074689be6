//! Products referenced by validated orders, resolvable by identifier.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::order::Order;
use crate::product::Product;

/// Products keyed by (category, product id). The product id is the product
/// name as it appears on orders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    products: BTreeMap<(String, String), Product>,
}

impl ProductCatalog {
    /// Collect one product per (category, name); the base price is the unit
    /// price of the first order line that mentions it.
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut products = BTreeMap::new();
        for order in orders {
            let key = (
                order.product_category().to_string(),
                order.product_name().to_string(),
            );
            let Entry::Vacant(slot) = products.entry(key) else {
                continue;
            };
            let name = order.product_name();
            match Product::new(name, name, order.product_category(), order.unit_price()) {
                Ok(product) => {
                    slot.insert(product);
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        order_id = %order.order_id(),
                        "skipping catalog product"
                    );
                }
            }
        }
        Self { products }
    }

    pub fn lookup(&self, category: &str, product_id: &str) -> Option<&Product> {
        self.products
            .get(&(category.to_string(), product_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products ordered by category, then id.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
