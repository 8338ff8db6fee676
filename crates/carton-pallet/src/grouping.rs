//! Pallet grouping: number style/colour groups and the items inside them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use carton_model::{PalletAllocation, PalletLabel, ShipmentRecord, StyleColor};

/// How group numbers are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    /// Groups are numbered in the order their first carton appears.
    #[default]
    FirstSeen,
    /// Groups are numbered by ascending `VPN:COLOR` key.
    Sorted,
}

#[derive(Debug, Clone)]
struct GroupEntry {
    group: u32,
    items: HashMap<String, u32>,
}

/// Pallet allocation for one invoice.
///
/// Numbering is only meaningful for the batch it was built from.
#[derive(Debug, Clone, Default)]
pub struct PalletPlan {
    allocations: Vec<PalletAllocation>,
    groups: HashMap<StyleColor, GroupEntry>,
}

impl PalletPlan {
    /// Group `records` by style and primary colour and label each distinct item.
    pub fn build(records: &[ShipmentRecord], order: GroupOrder) -> Self {
        // Encounter-ordered groups, each with encounter-ordered distinct items.
        let mut position: HashMap<StyleColor, usize> = HashMap::new();
        let mut ordered: Vec<(StyleColor, Vec<&str>)> = Vec::new();
        for record in records {
            let key = record.style_color();
            let slot = match position.get(&key) {
                Some(&slot) => slot,
                None => {
                    position.insert(key.clone(), ordered.len());
                    ordered.push((key, Vec::new()));
                    ordered.len() - 1
                }
            };
            let items = &mut ordered[slot].1;
            if !items.contains(&record.item.as_str()) {
                items.push(record.item.as_str());
            }
        }

        if order == GroupOrder::Sorted {
            ordered.sort_by_cached_key(|(key, _)| key.combined());
        }

        let mut allocations = Vec::new();
        let mut groups = HashMap::with_capacity(ordered.len());
        for (group_idx, (key, items)) in ordered.into_iter().enumerate() {
            let group = group_idx as u32 + 1;
            let mut entry = GroupEntry {
                group,
                items: HashMap::with_capacity(items.len()),
            };
            for (sub_idx, item) in items.into_iter().enumerate() {
                let sub = sub_idx as u32 + 1;
                entry.items.insert(item.to_string(), sub);
                allocations.push(PalletAllocation {
                    label: PalletLabel::new(group, sub),
                    key: key.clone(),
                    item: item.to_string(),
                });
            }
            groups.insert(key, entry);
        }
        allocations.sort_by_key(|allocation| allocation.label);

        debug!(
            rows = records.len(),
            groups = groups.len(),
            allocations = allocations.len(),
            ?order,
            "pallet plan built"
        );
        Self {
            allocations,
            groups,
        }
    }

    /// Allocations sorted by label.
    pub fn allocations(&self) -> &[PalletAllocation] {
        &self.allocations
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn group_of(&self, key: &StyleColor) -> Option<u32> {
        self.groups.get(key).map(|entry| entry.group)
    }

    /// Label for `item` within the style/colour group `key`.
    pub fn label_for(&self, key: &StyleColor, item: &str) -> Option<PalletLabel> {
        let entry = self.groups.get(key)?;
        let sub = entry.items.get(item)?;
        Some(PalletLabel::new(entry.group, *sub))
    }

    /// Items allocated to a group, ordered by sub-number.
    pub fn items_in(&self, key: &StyleColor) -> Vec<&PalletAllocation> {
        self.allocations
            .iter()
            .filter(|allocation| &allocation.key == key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(container: &str, item: &str, vpn: &str, color: &str) -> ShipmentRecord {
        ShipmentRecord::new(container, "INV", item, vpn).with_colors(Some(color), None)
    }

    #[test]
    fn groups_number_in_first_seen_order() {
        let records = vec![
            row("C1", "I1", "VPN-B", "RED"),
            row("C2", "I2", "VPN-A", "BLUE"),
            row("C3", "I3", "VPN-B", "RED"),
        ];
        let plan = PalletPlan::build(&records, GroupOrder::FirstSeen);
        assert_eq!(plan.group_of(&StyleColor::new("VPN-B", "RED")), Some(1));
        assert_eq!(plan.group_of(&StyleColor::new("VPN-A", "BLUE")), Some(2));
        assert_eq!(
            plan.label_for(&StyleColor::new("VPN-B", "RED"), "I3"),
            Some(PalletLabel::new(1, 2))
        );
    }

    #[test]
    fn sorted_order_follows_combined_key() {
        let records = vec![
            row("C1", "I1", "VPN-B", "RED"),
            row("C2", "I2", "VPN-A", "BLUE"),
        ];
        let plan = PalletPlan::build(&records, GroupOrder::Sorted);
        assert_eq!(plan.group_of(&StyleColor::new("VPN-A", "BLUE")), Some(1));
        assert_eq!(plan.group_of(&StyleColor::new("VPN-B", "RED")), Some(2));
    }

    #[test]
    fn repeated_items_share_a_sub_number() {
        let records = vec![
            row("C1", "I1", "V", "RED"),
            row("C2", "I1", "V", "RED"),
            row("C3", "I2", "V", "RED"),
        ];
        let plan = PalletPlan::build(&records, GroupOrder::FirstSeen);
        assert_eq!(plan.allocations().len(), 2);
        assert_eq!(plan.allocations()[1].label.to_string(), "1.2");
        assert_eq!(plan.items_in(&StyleColor::new("V", "RED")).len(), 2);
    }

    #[test]
    fn same_item_in_two_colours_gets_two_labels() {
        let records = vec![row("C1", "I1", "V", "RED"), row("C2", "I1", "V", "BLUE")];
        let plan = PalletPlan::build(&records, GroupOrder::FirstSeen);
        assert_eq!(
            plan.label_for(&StyleColor::new("V", "RED"), "I1"),
            Some(PalletLabel::new(1, 1))
        );
        assert_eq!(
            plan.label_for(&StyleColor::new("V", "BLUE"), "I1"),
            Some(PalletLabel::new(2, 1))
        );
    }

    #[test]
    fn empty_batch_builds_empty_plan() {
        let plan = PalletPlan::build(&[], GroupOrder::FirstSeen);
        assert!(plan.is_empty());
        assert_eq!(plan.group_count(), 0);
    }
}
