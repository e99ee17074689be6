//! `tally-ingest`: raw sales input, normalization and missing-value repair.
//!
//! Nothing in this crate fails on bad cell values: malformed fields turn into
//! sentinels here and are resolved by [`strategy::CleaningPlan`] or rejected
//! later by entity validation.

pub mod dataset;
pub mod error;
pub mod normalize;
pub mod raw;
pub mod reader;
pub mod strategy;

pub use dataset::{CRITICAL_FIELDS, Dataset, SalesRow};
pub use error::IngestError;
pub use normalize::{
    NormalizedStatus, RawValue, normalize_status, parse_date, parse_money, parse_quantity,
};
pub use raw::{COLUMNS, RawRecord};
pub use reader::{read_path, read_records};
pub use strategy::{CleaningPlan, MissingValueStrategy, StepReport};
