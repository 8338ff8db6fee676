//! Scan verification against a pallet plan.

use std::collections::BTreeSet;

use carton_model::{
    ItemDisplay, ItemInfo, ScanOutcome, ScanReport, ShipmentRecord, normalize_code,
};

use crate::grouping::PalletPlan;
use crate::index::ContainerIndex;

/// Verify one scanned code.
///
/// Codes missing from the index are always reported as mismatches.
pub fn verify_scan(
    raw: &str,
    records: &[ShipmentRecord],
    plan: &PalletPlan,
    index: &ContainerIndex,
) -> ScanReport {
    let code = normalize_code(raw);
    if code.is_empty() {
        return ScanReport {
            outcome: ScanOutcome::Empty,
            mixed: false,
        };
    }
    if index.lookup(&code).is_none() {
        return ScanReport {
            outcome: ScanOutcome::NotFound { code },
            mixed: false,
        };
    }

    let rows: Vec<&ShipmentRecord> = index
        .rows(&code)
        .iter()
        .filter_map(|&position| records.get(position))
        .collect();
    let Some(first) = rows.first() else {
        return ScanReport {
            outcome: ScanOutcome::NotInData { code },
            mixed: false,
        };
    };

    let mixed = distinct_items(&rows).len() > 1;
    let outcome = match plan.label_for(&first.style_color(), &first.item) {
        Some(label) => ScanOutcome::Matched { code, label },
        None => ScanOutcome::NotInPallet { code },
    };
    ScanReport { outcome, mixed }
}

/// Info panel data for a container, if it is in the batch.
pub fn item_info(code: &str, records: &[ShipmentRecord], index: &ContainerIndex) -> Option<ItemInfo> {
    let code = normalize_code(code);
    let rows: Vec<&ShipmentRecord> = index
        .rows(&code)
        .iter()
        .filter_map(|&position| records.get(position))
        .collect();
    let first = *rows.first()?;

    let items = distinct_items(&rows);
    let item = if items.len() > 1 {
        ItemDisplay::Mixed
    } else {
        ItemDisplay::Single(first.item.clone())
    };
    let total_containers = records
        .iter()
        .filter(|record| items.contains(record.item.as_str()))
        .map(ShipmentRecord::scan_code)
        .collect::<BTreeSet<_>>()
        .len();

    Some(ItemInfo {
        code,
        item,
        total_containers,
        price: first.price,
        style: first.vpn.clone(),
        color: first.diff_1.clone(),
    })
}

fn distinct_items<'a>(rows: &[&'a ShipmentRecord]) -> BTreeSet<&'a str> {
    rows.iter().map(|record| record.item.as_str()).collect()
}
