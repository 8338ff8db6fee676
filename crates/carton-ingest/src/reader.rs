//! Packing list reading and conversion into shipment records.
//!
//! CSV exports and `.xlsx` workbooks end up in the same all-text DataFrame.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, warn};

use carton_model::ShipmentRecord;
use carton_model::columns::{
    CONTAINER_ID, DIFF_1, DIFF_2, INVOICE_NO, ITEM, PRICE, REQUIRED_COLUMNS, VPN,
};

use crate::error::{IngestError, Result};
use crate::polars_utils::{numeric_column, string_column};
use crate::workbook::{is_workbook, is_workbook_path, read_workbook_bytes};

/// Reads a packing list file into a DataFrame.
///
/// Workbooks are recognised by extension or zip signature, anything else is
/// read as CSV. Every column is text so container barcodes keep leading zeros.
pub fn read_packing_list(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let origin = path.display().to_string();
    let file_read = |e: std::io::Error| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    };
    if is_workbook_path(path) || has_workbook_signature(path).map_err(file_read)? {
        let bytes = std::fs::read(path).map_err(file_read)?;
        return read_workbook_bytes(bytes, &origin);
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            origin: origin.clone(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
    debug!(origin = %origin, rows = df.height(), columns = df.width(), "packing list read");
    Ok(df)
}

/// Reads a packing list from downloaded bytes.
pub fn read_packing_list_bytes(bytes: Vec<u8>, origin: &str) -> Result<DataFrame> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyData {
            origin: origin.to_string(),
        });
    }
    if is_workbook(&bytes) {
        return read_workbook_bytes(bytes, origin);
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
    debug!(origin = %origin, rows = df.height(), columns = df.width(), "packing list read");
    Ok(df)
}

fn has_workbook_signature(path: &Path) -> std::io::Result<bool> {
    let mut head = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut head)?;
    Ok(is_workbook(&head))
}

/// Maps trimmed header names to the column names Polars assigned.
///
/// Spreadsheet exports often pad headers with spaces or a BOM.
fn header_map(df: &DataFrame) -> BTreeMap<String, String> {
    df.get_column_names()
        .into_iter()
        .map(|name| {
            let raw = name.to_string();
            let clean = raw.trim().trim_matches('\u{feff}').trim().to_string();
            (clean, raw)
        })
        .collect()
}

/// Converts a packing list DataFrame into typed records.
///
/// Rows without a container or invoice number are dropped.
pub fn records_from_frame(df: &DataFrame, origin: &str) -> Result<Vec<ShipmentRecord>> {
    let headers = header_map(df);
    for column in REQUIRED_COLUMNS {
        if !headers.contains_key(column) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
                origin: origin.to_string(),
            });
        }
    }

    let required = |name: &str| -> Result<Vec<String>> { string_column(df, &headers[name]) };
    let optional = |name: &str| -> Result<Option<Vec<String>>> {
        headers
            .get(name)
            .map(|actual| string_column(df, actual))
            .transpose()
    };

    let containers = required(CONTAINER_ID)?;
    let invoices = required(INVOICE_NO)?;
    let items = required(ITEM)?;
    let vpns = required(VPN)?;
    let diff_1 = optional(DIFF_1)?;
    let diff_2 = optional(DIFF_2)?;
    let prices = headers
        .get(PRICE)
        .map(|actual| numeric_column(df, actual))
        .transpose()?;

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for idx in 0..df.height() {
        if containers[idx].is_empty() || invoices[idx].is_empty() {
            skipped += 1;
            continue;
        }
        let record = ShipmentRecord::new(&containers[idx], &invoices[idx], &items[idx], &vpns[idx])
            .with_colors(
                diff_1.as_ref().map(|values| values[idx].as_str()),
                diff_2.as_ref().map(|values| values[idx].as_str()),
            )
            .with_price(prices.as_ref().and_then(|values| values[idx]));
        records.push(record);
    }
    if skipped > 0 {
        warn!(origin = %origin, skipped, "dropped rows without container or invoice");
    }
    if records.is_empty() {
        return Err(IngestError::EmptyData {
            origin: origin.to_string(),
        });
    }
    Ok(records)
}
