//! Process-local cache of a loaded packing list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::Result;
use crate::source::{DataSource, SourceLoader};
use crate::table::ShipmentTable;

/// Default cache lifetime (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

struct CachedTable {
    table: Arc<ShipmentTable>,
    fetched_at: Instant,
}

/// Loads a packing list once and reuses it until the TTL expires.
///
/// Switching invoices re-filters the cached table instead of downloading
/// the sheet again.
pub struct CachedLoader {
    loader: SourceLoader,
    source: DataSource,
    ttl: Duration,
    cache: Option<CachedTable>,
}

impl CachedLoader {
    pub fn new(loader: SourceLoader, source: DataSource) -> Self {
        Self {
            loader,
            source,
            ttl: DEFAULT_CACHE_TTL,
            cache: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Return the cached table, fetching it when missing, stale, or forced.
    pub fn table(&mut self, force_refresh: bool) -> Result<Arc<ShipmentTable>> {
        if !force_refresh {
            if let Some(cached) = &self.cache {
                if cached.fetched_at.elapsed() < self.ttl {
                    debug!(
                        source = %self.source,
                        age_ms = cached.fetched_at.elapsed().as_millis(),
                        "using cached packing list"
                    );
                    return Ok(Arc::clone(&cached.table));
                }
            }
        }

        let records = self.loader.load_records(&self.source)?;
        let table = Arc::new(ShipmentTable::new(records));
        self.cache = Some(CachedTable {
            table: Arc::clone(&table),
            fetched_at: Instant::now(),
        });
        Ok(table)
    }
}
