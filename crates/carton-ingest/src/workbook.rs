//! Excel (`.xlsx`) packing lists.
//!
//! The first worksheet is read into the same all-text `DataFrame` the CSV
//! reader produces, so record conversion does not care where rows came from.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::polars_utils::format_numeric;

/// Local file header signature of a zip archive, which `.xlsx` files are.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Returns whether `bytes` look like an `.xlsx` workbook.
pub fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC)
}

/// Returns whether `path` names an Excel workbook by extension.
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
}

/// Reads the first worksheet of a workbook; the first row holds the headers.
pub fn read_workbook_bytes(bytes: Vec<u8>, origin: &str) -> Result<DataFrame> {
    let invalid = |message: String| IngestError::Workbook {
        origin: origin.to_string(),
        message,
    };
    let mut workbook: Xlsx<Cursor<Vec<u8>>> =
        open_workbook_from_rs(Cursor::new(bytes)).map_err(|e: calamine::XlsxError| invalid(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| invalid("workbook has no worksheets".to_string()))?
        .map_err(|e| invalid(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyData {
            origin: origin.to_string(),
        });
    };
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell_text(cell);
            if name.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name
            }
        })
        .collect();

    let height = range.height().saturating_sub(1);
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(height); names.len()];
    for row in rows {
        for (idx, column) in values.iter_mut().enumerate() {
            let text = row.get(idx).map(cell_text).unwrap_or_default();
            column.push((!text.is_empty()).then_some(text));
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::new(name.into(), values))
        .collect();
    let df = DataFrame::new(columns)?;
    debug!(origin = %origin, rows = df.height(), columns = df.width(), "workbook read");
    Ok(df)
}

/// Cell text as a spreadsheet user would see it, without float noise.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => format_numeric(v.as_f64()),
    }
}
