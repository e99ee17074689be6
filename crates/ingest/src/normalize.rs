//! Field normalization: status, money, quantity and date coercion.
//!
//! Every function here is total. Malformed input becomes a sentinel
//! (`Unknown` / `None`) and is resolved later by the missing-value strategy
//! or by entity validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use tally_core::OrderStatus;

/// Status after normalization; `Unknown` covers missing and unrecognised input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizedStatus {
    Completed,
    Cancelled,
    Pending,
    Unknown,
}

impl NormalizedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NormalizedStatus::Completed => "completed",
            NormalizedStatus::Cancelled => "cancelled",
            NormalizedStatus::Pending => "pending",
            NormalizedStatus::Unknown => "unknown",
        }
    }

    /// The canonical status, or `None` for `Unknown`.
    pub fn known(self) -> Option<OrderStatus> {
        match self {
            NormalizedStatus::Completed => Some(OrderStatus::Completed),
            NormalizedStatus::Cancelled => Some(OrderStatus::Cancelled),
            NormalizedStatus::Pending => Some(OrderStatus::Pending),
            NormalizedStatus::Unknown => None,
        }
    }
}

impl core::fmt::Display for NormalizedStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

const COMPLETED_SYNONYMS: [&str; 3] = ["completed", "complete", "done"];
const CANCELLED_SYNONYMS: [&str; 2] = ["cancelled", "canceled"];
const PENDING_SYNONYMS: [&str; 3] = ["pending", "in progress", "processing"];

/// Map a raw status onto the canonical set (case-insensitive, trimmed).
pub fn normalize_status(raw: &str) -> NormalizedStatus {
    let value = raw.trim().to_lowercase();
    let value = value.as_str();
    if COMPLETED_SYNONYMS.contains(&value) {
        NormalizedStatus::Completed
    } else if CANCELLED_SYNONYMS.contains(&value) {
        NormalizedStatus::Cancelled
    } else if PENDING_SYNONYMS.contains(&value) {
        NormalizedStatus::Pending
    } else {
        NormalizedStatus::Unknown
    }
}

/// A money cell as it arrives: already numeric, or free text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(value: &'a String) -> Self {
        RawValue::Text(value.as_str())
    }
}

/// Parse money-like input (`"$1,234.50"`, `"99"`, `12.5`) into a number.
///
/// Text is stripped of thousands separators and then of everything except
/// digits, `.` and `-`. Degenerate leftovers and non-finite numbers yield
/// `None`.
pub fn parse_money<'a>(raw: impl Into<RawValue<'a>>) -> Option<f64> {
    match raw.into() {
        RawValue::Number(n) => n.is_finite().then_some(n),
        RawValue::Text(text) => parse_money_text(text),
    }
}

fn parse_money_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if matches!(cleaned.as_str(), "" | "-" | "." | "-.") {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric coercion for quantities; integrality is checked at validation.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Best-effort date coercion; `None` when no known format matches.
///
/// Slash dates are read month-first, falling back to day-first when the
/// month-first reading is impossible.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| parse_compact_date(trimmed))
}

/// `YYYYMMDD`.
fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_synonyms_are_recognised() {
        assert_eq!(normalize_status("Complete"), NormalizedStatus::Completed);
        assert_eq!(normalize_status(" DONE "), NormalizedStatus::Completed);
        assert_eq!(normalize_status("CANCELED"), NormalizedStatus::Cancelled);
        assert_eq!(normalize_status("cancelled"), NormalizedStatus::Cancelled);
        assert_eq!(normalize_status("In Progress"), NormalizedStatus::Pending);
        assert_eq!(normalize_status("processing"), NormalizedStatus::Pending);
    }

    #[test]
    fn unrecognised_status_is_unknown() {
        assert_eq!(normalize_status("xyz"), NormalizedStatus::Unknown);
        assert_eq!(normalize_status(""), NormalizedStatus::Unknown);
        assert_eq!(normalize_status("in-progress"), NormalizedStatus::Unknown);
        assert_eq!(normalize_status("xyz").known(), None);
    }

    #[test]
    fn money_strips_symbols_and_separators() {
        assert_eq!(parse_money("$1,234.50"), Some(1234.50));
        assert_eq!(parse_money("  99 "), Some(99.0));
        assert_eq!(parse_money("USD 12.5"), Some(12.5));
        assert_eq!(parse_money("-3.25"), Some(-3.25));
    }

    #[test]
    fn degenerate_money_is_unparseable() {
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("-"), None);
        assert_eq!(parse_money("."), None);
        assert_eq!(parse_money("-."), None);
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money("1.2.3"), None);
    }

    #[test]
    fn numeric_money_passes_through() {
        assert_eq!(parse_money(42.5), Some(42.5));
        assert_eq!(parse_money(7_i64), Some(7.0));
        assert_eq!(parse_money(f64::NAN), None);
        assert_eq!(parse_money(f64::INFINITY), None);
    }

    #[test]
    fn quantity_is_numeric_coerced() {
        assert_eq!(parse_quantity("3"), Some(3.0));
        assert_eq!(parse_quantity(" 2.0 "), Some(2.0));
        assert_eq!(parse_quantity("two"), None);
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn dates_in_common_formats_parse() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15"), Some(expected));
        assert_eq!(parse_date("2024/03/15"), Some(expected));
        assert_eq!(parse_date("03/15/2024"), Some(expected));
        assert_eq!(parse_date("15/03/2024"), Some(expected));
        assert_eq!(parse_date("2024-03-15 10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-03-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_date("15 Mar 2024"), Some(expected));
        assert_eq!(parse_date("20240315"), Some(expected));
    }

    #[test]
    fn invalid_dates_are_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }
}
