//! Sales domain records and their validation.
//!
//! Every record is built through a factory that returns a tagged result
//! (`Ok(record)` or `Err(ValidationError)`), so a batch can collect failures
//! without aborting.

pub mod catalog;
pub mod customer;
pub mod order;
pub mod product;
pub mod validation;

pub use catalog::ProductCatalog;
pub use customer::Customer;
pub use order::Order;
pub use product::Product;
pub use validation::{BatchAborted, RejectedRow, ValidatedBatch, ValidationPolicy, validate_orders};
