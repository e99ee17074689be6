use std::path::PathBuf;

use thiserror::Error;

/// Failure to read the raw sales table.
///
/// Malformed cell values are not errors; they are absorbed by normalization.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read csv header: {0}")]
    Header(#[source] csv::Error),

    #[error("failed to read csv row at line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
