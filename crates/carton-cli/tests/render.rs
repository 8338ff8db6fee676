//! Rendering of pallet plans and scan panels.

use carton_cli::commands::scan_codes;
use carton_cli::render::{item_panel, pallet_json, pallet_table, recent_lines, scan_json};
use carton_ingest::InvoiceBatch;
use carton_model::ShipmentRecord;
use carton_pallet::{ScanSession, SessionOptions};

fn session() -> ScanSession {
    let row = |container: &str, item: &str, vpn: &str, color: &str| {
        ShipmentRecord::new(container, "INV-A", item, vpn)
            .with_colors(Some(color), None)
            .with_price(Some(12.5))
    };
    let batch = InvoiceBatch::new(
        "INV-A",
        vec![
            row("1001", "SKU1", "STYLE1", "BLK"),
            row("1002", "SKU2", "STYLE1", "BLK"),
            row("1003", "SKU3", "STYLE2", "WHT"),
        ],
    );
    ScanSession::open(batch, SessionOptions::default()).unwrap()
}

#[test]
fn pallet_plan_as_json() {
    let session = session();
    let json = pallet_json(session.plan().allocations()).unwrap();
    insta::assert_snapshot!(json, @r#"
    [
      {
        "Scan_Carton_No": "1.1",
        "Main_No": 1,
        "Sub_No": 1,
        "VPNs_combined": "STYLE1:BLK",
        "Item": "SKU1"
      },
      {
        "Scan_Carton_No": "1.2",
        "Main_No": 1,
        "Sub_No": 2,
        "VPNs_combined": "STYLE1:BLK",
        "Item": "SKU2"
      },
      {
        "Scan_Carton_No": "2.1",
        "Main_No": 2,
        "Sub_No": 1,
        "VPNs_combined": "STYLE2:WHT",
        "Item": "SKU3"
      }
    ]
    "#);
}

#[test]
fn pallet_table_lists_every_label() {
    let session = session();
    let rendered = pallet_table(session.plan().allocations()).to_string();
    for expected in ["Scan_Carton_No", "VPNs_combined", "1.1", "1.2", "2.1", "STYLE2:WHT"] {
        assert!(rendered.contains(expected), "missing {expected}");
    }
}

#[test]
fn item_panel_after_match() {
    let mut session = session();
    scan_codes(&mut session, &["1003".to_string()]);
    let info = session.item_info().unwrap();
    insta::assert_snapshot!(item_panel(&info), @r"
    ITEM: SKU3 | Total Containers: 1 | Price: 12.5
    Style: STYLE2 | Color: WHT
    ");
}

#[test]
fn recent_lines_placeholder() {
    let session = session();
    assert_eq!(recent_lines(&session), vec!["No scans yet..."]);
}

#[test]
fn scan_results_as_json() {
    let mut session = session();
    let results = scan_codes(&mut session, &["1002".to_string(), "9999".to_string()]);
    let value: serde_json::Value = serde_json::from_str(&scan_json(&results).unwrap()).unwrap();

    assert_eq!(value[0]["input"], "1002");
    assert_eq!(value[0]["status"], "success");
    assert_eq!(value[0]["message"], "Pallet - 1.2");
    assert_eq!(value[0]["outcome"]["label"]["group"], 1);
    assert_eq!(value[1]["status"], "danger");
    assert_eq!(value[1]["message"], "MISMATCH: 9999 not found");
    assert_eq!(value[1]["mixed"], false);
}
