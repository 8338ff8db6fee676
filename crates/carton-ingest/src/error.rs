//! Error types for packing list ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or reading a packing list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === Source Errors ===
    /// Packing list file not found.
    #[error("packing list not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport failed (DNS, TLS, timeout, connection reset).
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A credential named in the settings is not set in the environment.
    #[error("credential variable {variable} is not set")]
    MissingCredential { variable: String },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse packing list {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// Failed to open or read an Excel workbook.
    #[error("failed to read workbook {origin}: {message}")]
    Workbook { origin: String, message: String },

    /// Required column not found in the packing list.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: String, origin: String },

    /// Packing list has no usable rows.
    #[error("packing list has no rows: {origin}")]
    EmptyData { origin: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Returns a short message suitable for showing to the operator.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::FileNotFound { .. } | Self::FileRead { .. } => {
                "Could not open the packing list. Check that the shared folder is synced."
            }
            Self::Http { .. } => "Could not reach the document server. Check the connection.",
            Self::HttpStatus { .. } => "The document server refused the request.",
            Self::MissingCredential { .. } => "Document server credentials are not configured.",
            Self::CsvParse { .. }
            | Self::Workbook { .. }
            | Self::MissingColumn { .. }
            | Self::DataFrame { .. } => {
                "The packing list is not in the expected format."
            }
            Self::EmptyData { .. } => "The packing list is empty.",
        }
    }

    /// Returns whether retrying the load might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
