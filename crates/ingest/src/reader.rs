//! CSV source for raw sales rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::error::IngestError;
use crate::raw::{COLUMNS, RawRecord};

/// Read raw rows from CSV text with a header line.
///
/// Header names are trimmed and all of [`COLUMNS`] must be present; extra
/// columns are ignored and short rows leave trailing fields empty. Bytes
/// that are not valid UTF-8 are replaced with `U+FFFD` instead of failing
/// the read.
pub fn read_records<R: Read>(source: R) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(source);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(IngestError::Header)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let positions: Vec<Option<usize>> = COLUMNS
        .iter()
        .map(|column| headers.iter().position(|h| h == column))
        .collect();
    let missing: Vec<String> = COLUMNS
        .iter()
        .zip(&positions)
        .filter(|(_, pos)| pos.is_none())
        .map(|(column, _)| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let row = result.map_err(|source| IngestError::Row {
            line: source.position().map(|p| p.line()).unwrap_or_default(),
            source,
        })?;
        let cell = |column: usize| -> Option<String> {
            positions[column]
                .and_then(|pos| row.get(pos))
                .filter(|value| !value.is_empty())
                .map(|value| String::from_utf8_lossy(value).into_owned())
        };
        records.push(RawRecord {
            order_id: cell(0),
            customer_id: cell(1),
            order_date: cell(2),
            product_category: cell(3),
            product_name: cell(4),
            quantity: cell(5),
            unit_price: cell(6),
            order_amount: cell(7),
            status: cell(8),
        });
    }

    tracing::debug!(rows = records.len(), "read raw sales rows");
    Ok(records)
}

/// Open a CSV file and read its raw rows.
pub fn read_path(path: &Path) -> Result<Vec<RawRecord>, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}
