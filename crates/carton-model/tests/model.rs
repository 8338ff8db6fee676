//! Tests for carton-model types.

use carton_model::{
    CartonError, PalletAllocation, PalletLabel, ScanOutcome, ScanReport, ScanStatus, StyleColor,
};

#[test]
fn pallet_label_parses_and_displays() {
    let label: PalletLabel = "12.3".parse().expect("parse label");
    assert_eq!(label, PalletLabel::new(12, 3));
    assert_eq!(label.to_string(), "12.3");
}

#[test]
fn pallet_label_rejects_garbage() {
    for raw in ["", "1", "1.", ".2", "a.b", "0.1", "1.0"] {
        let result = raw.parse::<PalletLabel>();
        assert!(
            matches!(result, Err(CartonError::InvalidLabel(_))),
            "{raw:?} should not parse"
        );
    }
}

#[test]
fn pallet_labels_order_by_group_then_sub() {
    let mut labels = vec![
        PalletLabel::new(2, 1),
        PalletLabel::new(1, 10),
        PalletLabel::new(1, 2),
    ];
    labels.sort();
    assert_eq!(
        labels,
        vec![
            PalletLabel::new(1, 2),
            PalletLabel::new(1, 10),
            PalletLabel::new(2, 1)
        ]
    );
}

#[test]
fn allocation_serializes() {
    let allocation = PalletAllocation {
        label: PalletLabel::new(1, 2),
        key: StyleColor::new("VPN1", "RED"),
        item: "ITEM9".to_string(),
    };
    let json = serde_json::to_value(&allocation).expect("serialize allocation");
    assert_eq!(json["label"]["group"], 1);
    assert_eq!(json["label"]["sub"], 2);
    assert_eq!(json["key"]["style"], "VPN1");
    assert_eq!(json["item"], "ITEM9");
}

#[test]
fn outcome_serializes_with_tag() {
    let outcome = ScanOutcome::NotFound {
        code: "ZZ".to_string(),
    };
    let json = serde_json::to_value(&outcome).expect("serialize outcome");
    assert_eq!(json["outcome"], "not_found");
    assert_eq!(json["code"], "ZZ");
}

#[test]
fn only_matches_succeed() {
    let cases = [
        ScanOutcome::Empty,
        ScanOutcome::NotFound {
            code: "A".to_string(),
        },
        ScanOutcome::NotInData {
            code: "A".to_string(),
        },
        ScanOutcome::NotInPallet {
            code: "A".to_string(),
        },
    ];
    for outcome in cases {
        assert!(!outcome.is_match());
        assert_eq!(outcome.status(), ScanStatus::Danger);
        assert!(outcome.label().is_none());
    }
}

#[test]
fn report_without_mix_uses_outcome_status() {
    let report = ScanReport {
        outcome: ScanOutcome::Matched {
            code: "A".to_string(),
            label: PalletLabel::new(1, 1),
        },
        mixed: false,
    };
    assert_eq!(report.display_status(), ScanStatus::Success);
    assert_eq!(ScanStatus::Success.color_hex(), "#27ae60");
}
