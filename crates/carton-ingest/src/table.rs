//! The loaded packing list and per-invoice views of it.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use carton_model::ShipmentRecord;

/// All shipment rows of one packing list.
#[derive(Debug, Clone, Default)]
pub struct ShipmentTable {
    records: Vec<ShipmentRecord>,
}

/// An invoice with its carton count, as offered for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    pub invoice_no: String,
    /// Distinct containers shipped under the invoice.
    pub cartons: usize,
}

/// The rows of a single invoice.
#[derive(Debug, Clone)]
pub struct InvoiceBatch {
    pub invoice_no: String,
    pub records: Vec<ShipmentRecord>,
}

impl ShipmentTable {
    pub fn new(records: Vec<ShipmentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct invoice numbers in selection order.
    ///
    /// Numeric invoice numbers sort numerically and ahead of alphanumeric ones.
    pub fn invoices(&self) -> Vec<InvoiceSummary> {
        let mut containers: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for record in &self.records {
            containers
                .entry(record.invoice_no.as_str())
                .or_default()
                .insert(record.scan_code());
        }
        let mut summaries: Vec<InvoiceSummary> = containers
            .into_iter()
            .map(|(invoice_no, codes)| InvoiceSummary {
                invoice_no: invoice_no.to_string(),
                cartons: codes.len(),
            })
            .collect();
        summaries.sort_by(|a, b| compare_invoice(&a.invoice_no, &b.invoice_no));
        summaries
    }

    /// Rows belonging to `invoice_no`, in sheet order.
    pub fn batch(&self, invoice_no: &str) -> Option<InvoiceBatch> {
        let wanted = invoice_no.trim();
        let records: Vec<ShipmentRecord> = self
            .records
            .iter()
            .filter(|record| record.invoice_no == wanted)
            .cloned()
            .collect();
        if records.is_empty() {
            None
        } else {
            Some(InvoiceBatch {
                invoice_no: wanted.to_string(),
                records,
            })
        }
    }
}

impl InvoiceBatch {
    pub fn new(invoice_no: impl Into<String>, records: Vec<ShipmentRecord>) -> Self {
        Self {
            invoice_no: invoice_no.into(),
            records,
        }
    }

    /// Number of distinct containers in the batch.
    pub fn carton_count(&self) -> usize {
        self.records
            .iter()
            .map(ShipmentRecord::scan_code)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

fn compare_invoice(left: &str, right: &str) -> Ordering {
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r).then_with(|| left.cmp(right)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.cmp(right),
    }
}
