//! `tally-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no parsing of raw
//! input).

pub mod entity;
pub mod error;
pub mod id;
pub mod status;

pub use entity::{Entity, require_non_empty, require_non_empty_id};
pub use error::{InsufficientData, ValidationError};
pub use id::{CustomerId, OrderId, ProductId, RunId, StringId};
pub use status::OrderStatus;
