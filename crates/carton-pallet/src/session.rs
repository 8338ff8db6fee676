//! Scan session for one selected invoice.
//!
//! Holds everything an operator interaction needs: the invoice batch, its
//! pallet plan and container index, the last report and the scan history.
//! Selecting another invoice means opening a new session.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use carton_ingest::{InvoiceBatch, ShipmentTable};
use carton_model::{ItemInfo, READY_MESSAGE, ScanEvent, ScanReport, ScanStatus};

use crate::error::{PalletError, Result};
use crate::grouping::{GroupOrder, PalletPlan};
use crate::index::ContainerIndex;
use crate::verify::{item_info, verify_scan};

/// Default number of scans kept in the history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Default number of scans shown as "recent".
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Tunables for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub history_capacity: usize,
    pub recent_limit: usize,
    pub group_order: GroupOrder,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            recent_limit: DEFAULT_RECENT_LIMIT,
            group_order: GroupOrder::default(),
        }
    }
}

/// Typed state of an operator scanning one invoice.
#[derive(Debug, Clone)]
pub struct ScanSession {
    batch: InvoiceBatch,
    plan: PalletPlan,
    index: ContainerIndex,
    options: SessionOptions,
    last: Option<ScanReport>,
    history: VecDeque<ScanEvent>,
}

impl ScanSession {
    /// Build the plan and index for `batch` and start in the ready state.
    pub fn open(batch: InvoiceBatch, options: SessionOptions) -> Result<Self> {
        if batch.records.is_empty() {
            return Err(PalletError::EmptyBatch {
                invoice_no: batch.invoice_no,
            });
        }
        let span = info_span!("open_session", invoice = %batch.invoice_no);
        let _guard = span.enter();
        let plan = PalletPlan::build(&batch.records, options.group_order);
        let index = ContainerIndex::build(&batch.records);
        info!(
            invoice = %batch.invoice_no,
            cartons = index.len(),
            groups = plan.group_count(),
            "session opened"
        );
        Ok(Self {
            batch,
            plan,
            index,
            options,
            last: None,
            history: VecDeque::with_capacity(options.history_capacity.min(64)),
        })
    }

    /// Filter `table` to `invoice_no` and open a session on it.
    pub fn for_invoice(
        table: &ShipmentTable,
        invoice_no: &str,
        options: SessionOptions,
    ) -> Result<Self> {
        let batch = table
            .batch(invoice_no)
            .ok_or_else(|| PalletError::UnknownInvoice {
                invoice_no: invoice_no.trim().to_string(),
            })?;
        Self::open(batch, options)
    }

    pub fn invoice_no(&self) -> &str {
        &self.batch.invoice_no
    }

    pub fn batch(&self) -> &InvoiceBatch {
        &self.batch
    }

    pub fn plan(&self) -> &PalletPlan {
        &self.plan
    }

    pub fn index(&self) -> &ContainerIndex {
        &self.index
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Verify a scan and make it the current report.
    ///
    /// Every non-empty code is recorded in the history; an empty scan only
    /// changes the banner.
    pub fn scan(&mut self, raw: &str, at: DateTime<Local>) -> ScanReport {
        let report = verify_scan(raw, &self.batch.records, &self.plan, &self.index);
        match report.outcome.code() {
            Some(code) => {
                info!(
                    invoice = %self.batch.invoice_no,
                    code = %code,
                    status = %report.display_status(),
                    "scan"
                );
                self.history.push_front(ScanEvent::new(at, code));
                self.history.truncate(self.options.history_capacity.max(1));
            }
            None => debug!(invoice = %self.batch.invoice_no, "empty scan"),
        }
        self.last = Some(report.clone());
        report
    }

    /// Current banner status.
    pub fn status(&self) -> ScanStatus {
        self.last
            .as_ref()
            .map_or(ScanStatus::Ready, ScanReport::display_status)
    }

    /// Current banner text.
    pub fn status_message(&self) -> String {
        self.last
            .as_ref()
            .map_or_else(|| READY_MESSAGE.to_string(), |report| report.outcome.message())
    }

    /// Full history, newest first.
    pub fn history(&self) -> impl Iterator<Item = &ScanEvent> {
        self.history.iter()
    }

    /// The most recent scans for display, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &ScanEvent> {
        self.history.iter().take(self.options.recent_limit)
    }

    pub fn scan_count(&self) -> usize {
        self.history.len()
    }

    /// Info panel for the newest code in the history, when it is in this batch.
    pub fn item_info(&self) -> Option<ItemInfo> {
        let event = self.history.front()?;
        item_info(&event.code, &self.batch.records, &self.index)
    }

    /// Distinct containers in the batch.
    pub fn total_cartons(&self) -> usize {
        self.index.len()
    }

    /// Clear the status and history without rebuilding the plan.
    pub fn reset(&mut self) {
        self.last = None;
        self.history.clear();
    }
}
