//! Property tests for pallet grouping and lookup.

use std::collections::{BTreeMap, BTreeSet};

use carton_model::{ShipmentRecord, normalize_code};
use carton_pallet::{ContainerIndex, GroupOrder, PalletPlan, verify_scan};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = ShipmentRecord> {
    (
        "[A-Z0-9]{1,4}",
        "I[0-9]",
        "V[0-3]",
        prop::option::of("(RED|BLUE|GRN)"),
        prop::option::of("(LT|DK)"),
    )
        .prop_map(|(container, item, vpn, diff_1, diff_2)| {
            ShipmentRecord::new(container, "INV", item, vpn)
                .with_colors(diff_1.as_deref(), diff_2.as_deref())
        })
}

fn order_strategy() -> impl Strategy<Value = GroupOrder> {
    prop_oneof![Just(GroupOrder::FirstSeen), Just(GroupOrder::Sorted)]
}

proptest! {
    #[test]
    fn same_key_shares_group_and_items_number_sequentially(
        records in prop::collection::vec(record_strategy(), 0..40),
        order in order_strategy(),
    ) {
        let plan = PalletPlan::build(&records, order);

        for record in &records {
            let label = plan.label_for(&record.style_color(), &record.item);
            prop_assert!(label.is_some());
            prop_assert_eq!(label.map(|l| l.group), plan.group_of(&record.style_color()));
        }

        let mut subs: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for allocation in plan.allocations() {
            subs.entry(allocation.key.combined()).or_default().push(allocation.sub());
        }
        for numbers in subs.values() {
            let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
            prop_assert_eq!(numbers, &expected);
        }

        let groups: BTreeSet<u32> = plan.allocations().iter().map(|a| a.group()).collect();
        let expected: BTreeSet<u32> = (1..=plan.group_count() as u32).collect();
        prop_assert_eq!(groups, expected);
    }

    #[test]
    fn every_container_is_indexed_with_alternate(
        records in prop::collection::vec(record_strategy(), 0..40),
    ) {
        let index = ContainerIndex::build(&records);
        for record in &records {
            prop_assert!(index.primary(&record.container_id).is_some());
            prop_assert!(index.alternate(&record.container_id).is_some());
        }
    }

    #[test]
    fn absent_codes_never_match(
        records in prop::collection::vec(record_strategy(), 0..40),
        unknown_code in "[a-z0-9 ]{0,6}",
    ) {
        let plan = PalletPlan::build(&records, GroupOrder::FirstSeen);
        let index = ContainerIndex::build(&records);
        let known: BTreeSet<String> = records.iter().map(ShipmentRecord::scan_code).collect();
        prop_assume!(!known.contains(&normalize_code(&unknown_code)));
        let report = verify_scan(&unknown_code, &records, &plan, &index);
        prop_assert!(!report.outcome.is_match());
    }

    #[test]
    fn rebuilding_is_deterministic(
        records in prop::collection::vec(record_strategy(), 0..40),
        order in order_strategy(),
    ) {
        let first = PalletPlan::build(&records, order);
        let second = PalletPlan::build(&records, order);
        prop_assert_eq!(first.allocations(), second.allocations());
    }
}
