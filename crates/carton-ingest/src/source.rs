//! Where the packing list comes from.
//!
//! Two interchangeable sources: a local (or synced share) file, and an HTTP
//! document endpoint that serves the file as CSV.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use carton_model::ShipmentRecord;

use crate::error::{IngestError, Result};
use crate::reader::{read_packing_list, read_packing_list_bytes, records_from_frame};

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials for an HTTP source.
///
/// Secrets are looked up in the environment by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HttpAuth {
    #[default]
    None,
    Basic {
        username: String,
        password_env: String,
    },
    Bearer {
        token_env: String,
    },
}

/// A packing list location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    File {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default)]
        auth: HttpAuth,
    },
}

impl DataSource {
    /// Interpret a command line argument as a URL or a file path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Http {
                url: trimmed.to_string(),
                auth: HttpAuth::None,
            }
        } else {
            Self::File {
                path: PathBuf::from(trimmed),
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Http { url, .. } => f.write_str(url),
        }
    }
}

/// Loads packing lists from a [`DataSource`].
pub struct SourceLoader {
    client: Client,
}

impl SourceLoader {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Http {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Fetch and parse the packing list into a DataFrame.
    pub fn load_frame(&self, source: &DataSource) -> Result<DataFrame> {
        match source {
            DataSource::File { path } => read_packing_list(path),
            DataSource::Http { url, auth } => {
                let bytes = self.download(url, auth)?;
                read_packing_list_bytes(bytes, url)
            }
        }
    }

    /// Fetch the packing list and convert it into shipment records.
    pub fn load_records(&self, source: &DataSource) -> Result<Vec<ShipmentRecord>> {
        let df = self.load_frame(source)?;
        let records = records_from_frame(&df, &source.to_string())?;
        info!(source = %source, records = records.len(), "packing list loaded");
        Ok(records)
    }

    fn download(&self, url: &str, auth: &HttpAuth) -> Result<Vec<u8>> {
        debug!(url = %url, "downloading packing list");
        let mut request = self.client.get(url).header(
            USER_AGENT,
            format!("carton-segregator/{}", env!("CARGO_PKG_VERSION")),
        );
        request = match auth {
            HttpAuth::None => request,
            HttpAuth::Basic {
                username,
                password_env,
            } => request.basic_auth(username, Some(credential(password_env)?)),
            HttpAuth::Bearer { token_env } => request.bearer_auth(credential(token_env)?),
        };

        let response = request.send().map_err(|e| IngestError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !response.status().is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        let bytes = response.bytes().map_err(|e| IngestError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        debug!(url = %url, bytes = bytes.len(), "download complete");
        Ok(bytes.to_vec())
    }
}

fn credential(variable: &str) -> Result<String> {
    std::env::var(variable)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| IngestError::MissingCredential {
            variable: variable.to_string(),
        })
}
