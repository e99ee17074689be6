//! Entity capability: identity shared by every domain record.
//!
//! There is no base type. Each concrete record composes the same identity
//! check ([`require_non_empty_id`]) inside its own factory.

use crate::error::ValidationError;
use crate::id::StringId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Require a trimmed, non-empty text value.
pub fn require_non_empty(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(entity, field, "must be a non-empty string"));
    }
    Ok(trimmed.to_string())
}

/// Require a trimmed, non-empty identifier and wrap it in its typed id.
pub fn require_non_empty_id<I: StringId>(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<I, ValidationError> {
    require_non_empty(entity, field, value).map(I::from_trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::OrderId;

    #[test]
    fn require_non_empty_trims() {
        assert_eq!(require_non_empty("product", "name", "  Lamp ").unwrap(), "Lamp");
    }

    #[test]
    fn whitespace_only_is_rejected() {
        let err = require_non_empty("product", "name", " \t ").unwrap_err();
        assert_eq!(err.entity, "product");
        assert_eq!(err.field, "name");
    }

    #[test]
    fn require_non_empty_id_builds_typed_id() {
        let id: OrderId = require_non_empty_id("order", "order_id", " O-1 ").unwrap();
        assert_eq!(id.as_str(), "O-1");

        let err = require_non_empty_id::<OrderId>("order", "order_id", "").unwrap_err();
        assert_eq!(err.field, "order_id");
    }
}
