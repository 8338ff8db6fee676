//! Packing list ingestion.
//!
//! This crate fetches the supplier packing list from a local file or an HTTP
//! document endpoint, reads the `.xlsx` workbook or CSV export into Polars,
//! and turns it into typed [`ShipmentRecord`](carton_model::ShipmentRecord)s.
//!
//! # Example
//!
//! ```ignore
//! use carton_ingest::{DataSource, SourceLoader, ShipmentTable};
//!
//! let loader = SourceLoader::new()?;
//! let source = DataSource::parse("/mnt/share/supplier_packing_list_out.csv");
//! let table = ShipmentTable::new(loader.load_records(&source)?);
//! for invoice in table.invoices() {
//!     println!("{} ({} cartons)", invoice.invoice_no, invoice.cartons);
//! }
//! ```

mod cache;
mod error;
mod polars_utils;
mod reader;
mod source;
mod table;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
pub use reader::{read_packing_list, read_packing_list_bytes, records_from_frame};

// === Sources ===
pub use cache::{CachedLoader, DEFAULT_CACHE_TTL};
pub use source::{DEFAULT_TIMEOUT, DataSource, HttpAuth, SourceLoader};

// === Tables ===
pub use table::{InvoiceBatch, InvoiceSummary, ShipmentTable};
