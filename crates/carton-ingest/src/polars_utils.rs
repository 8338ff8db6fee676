//! Polars AnyValue helpers for packing list cells.

use polars::prelude::{AnyValue, DataFrame};

use crate::error::Result;

/// Converts a Polars AnyValue to a trimmed String.
/// Returns empty string for Null and spreadsheet "nan" placeholders.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    let text = match value {
        AnyValue::Null => return String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parses a price-like cell.
///
/// Commas are accepted only as thousands separators ahead of a decimal
/// point. A decimal comma (`12,50`) is rejected rather than misread.
pub fn parse_f64(value: &str) -> Option<f64> {
    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    let cleaned = match (compact.rfind(','), compact.find('.')) {
        (None, _) => compact,
        (Some(comma), Some(dot)) if comma < dot => compact.replace(',', ""),
        _ => return None,
    };
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads every cell of a column as a trimmed string.
pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Reads every cell of a column as an optional number.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(series.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}
