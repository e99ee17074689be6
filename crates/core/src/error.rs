//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// A record failed one of its entity invariants.
///
/// Names the entity kind, the offending field and the violated constraint so
/// batch reports can be grouped without parsing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{entity}.{field}: {constraint}")]
pub struct ValidationError {
    pub entity: &'static str,
    pub field: &'static str,
    pub constraint: String,
}

impl ValidationError {
    pub fn new(entity: &'static str, field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            entity,
            field,
            constraint: constraint.into(),
        }
    }
}

/// Too few records for a requested computation.
///
/// Informational: callers turn this into an explanatory result rather than
/// failing the run.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{computation} needs at least {required} records, found {found}")]
pub struct InsufficientData {
    pub computation: &'static str,
    pub required: usize,
    pub found: usize,
}

impl InsufficientData {
    pub fn new(computation: &'static str, required: usize, found: usize) -> Self {
        Self {
            computation,
            required,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field_and_constraint() {
        let err = ValidationError::new("order", "quantity", "must be > 0");
        assert_eq!(err.to_string(), "order.quantity: must be > 0");
    }

    #[test]
    fn insufficient_data_reports_counts() {
        let err = InsufficientData::new("segmentation", 4, 3);
        assert_eq!(err.to_string(), "segmentation needs at least 4 records, found 3");
    }
}
