use serde::Serialize;

use tally_core::{CustomerId, Entity, ValidationError, require_non_empty, require_non_empty_id};
use tally_ingest::{RawValue, parse_money};

const ENTITY: &str = "customer";

/// A customer; `lifetime_value` defaults to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    lifetime_value: f64,
}

impl Customer {
    pub fn new(id: &str, name: &str, email: &str) -> Result<Self, ValidationError> {
        Self::with_lifetime_value(id, name, email, 0.0)
    }

    /// Validate and build a customer with a known lifetime value (numeric or
    /// money-like text, `>= 0`).
    pub fn with_lifetime_value<'a>(
        id: &str,
        name: &str,
        email: &str,
        lifetime_value: impl Into<RawValue<'a>>,
    ) -> Result<Self, ValidationError> {
        let id = require_non_empty_id(ENTITY, "id", id)?;
        let name = require_non_empty(ENTITY, "name", name)?;
        let email = email.trim();
        if !email.contains('@') {
            return Err(ValidationError::new(ENTITY, "email", "must contain '@'"));
        }
        let lifetime_value = parse_money(lifetime_value)
            .ok_or_else(|| ValidationError::new(ENTITY, "lifetime_value", "must be numeric"))?;
        if lifetime_value < 0.0 {
            return Err(ValidationError::new(ENTITY, "lifetime_value", "must be >= 0"));
        }

        Ok(Self {
            id,
            name,
            email: email.to_string(),
            lifetime_value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn lifetime_value(&self) -> f64 {
        self.lifetime_value
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Customer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Customer(id={})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_value_defaults_to_zero() {
        let customer = Customer::new("C-1", "Ada", "ada@example.com").unwrap();
        assert_eq!(customer.lifetime_value(), 0.0);
        assert_eq!(customer.email(), "ada@example.com");
    }

    #[test]
    fn email_must_contain_at_sign() {
        let err = Customer::new("C-1", "Ada", "ada.example.com").unwrap_err();
        assert_eq!(err.field, "email");
    }

    #[test]
    fn lifetime_value_is_coerced_and_checked() {
        let customer = Customer::with_lifetime_value("C-1", "Ada", "a@b.c", "$2,500").unwrap();
        assert_eq!(customer.lifetime_value(), 2500.0);

        let err = Customer::with_lifetime_value("C-1", "Ada", "a@b.c", -1.0).unwrap_err();
        assert_eq!(err.field, "lifetime_value");
        assert_eq!(err.constraint, "must be >= 0");

        let err = Customer::with_lifetime_value("C-1", "Ada", "a@b.c", "lots").unwrap_err();
        assert_eq!(err.constraint, "must be numeric");
    }

    #[test]
    fn id_must_be_non_empty() {
        let err = Customer::new("  ", "Ada", "a@b.c").unwrap_err();
        assert_eq!(err.entity, "customer");
        assert_eq!(err.field, "id");
    }
}
