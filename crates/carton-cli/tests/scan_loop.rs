//! Interactive scan loop driven from in-memory input.

use std::io::{Cursor, Write};

use carton_cli::commands::ScanLoop;
use carton_ingest::{CachedLoader, DataSource, SourceLoader};
use carton_model::ScanStatus;
use carton_pallet::SessionOptions;
use tempfile::NamedTempFile;

const PACKING_LIST: &str = "\
CONTAINER_ID,C-INVC-NO,ITEM,VPN,DIFF_1,DIFF_2,PRICE
1001,INV-A,SKU1,STYLE1,BLK,,25
1002,INV-A,SKU2,STYLE1,BLK,LT,25
1003,INV-A,SKU3,STYLE2,WHT,,12.5
1003,INV-A,SKU4,STYLE2,WHT,,12.5
2001,INV-B,SKU1,STYLE1,BLK,,25
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn open(file: &NamedTempFile, invoice: &str) -> ScanLoop {
    let loader = CachedLoader::new(
        SourceLoader::new().unwrap(),
        DataSource::File {
            path: file.path().to_path_buf(),
        },
    );
    ScanLoop::open(loader, invoice, SessionOptions::default()).unwrap()
}

fn drive(scan_loop: &mut ScanLoop, input: &str) -> String {
    let mut output = Vec::new();
    scan_loop.run(Cursor::new(input), &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn scans_until_quit() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");

    let output = drive(&mut scan_loop, "1002\n:q\n1001\n");

    assert!(output.contains("READY TO SCAN"));
    assert!(output.contains("No scans yet..."));
    assert!(output.contains("Pallet - 1.2"));
    assert!(output.contains("ITEM: SKU2 | Total Containers: 1 | Price: 25"));
    assert!(output.contains("Style: STYLE1 | Color: BLK"));
    assert!(output.contains("Total Cartons: 3"));
    assert_eq!(scan_loop.session().scan_count(), 1);
    assert_eq!(scan_loop.session().status(), ScanStatus::Success);
}

#[test]
fn mismatch_and_mixed_containers() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");

    let output = drive(&mut scan_loop, " 2001 \n1003\n");

    assert!(output.contains("MISMATCH: 2001 not found"));
    assert!(output.contains("ITEM: MIXED"));
    assert_eq!(scan_loop.session().status(), ScanStatus::Mixed);
    assert_eq!(scan_loop.session().scan_count(), 2);
}

#[test]
fn switching_invoice_resets_history() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");

    let output = drive(&mut scan_loop, "1001\n:inv INV-B\n");

    assert!(output.contains("Invoice: INV-B"));
    assert_eq!(scan_loop.session().invoice_no(), "INV-B");
    assert_eq!(scan_loop.session().scan_count(), 0);
    assert_eq!(scan_loop.session().status(), ScanStatus::Ready);
}

#[test]
fn unknown_invoice_keeps_current_session() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");

    let output = drive(&mut scan_loop, "1001\n:inv INV-Z\n");

    assert!(output.contains("error: invoice INV-Z is not in the packing list"));
    assert_eq!(scan_loop.session().invoice_no(), "INV-A");
    assert_eq!(scan_loop.session().scan_count(), 1);
}

#[test]
fn pallets_and_reset_commands() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");

    let output = drive(&mut scan_loop, "1001\n:pallets\n:reset\n");

    assert!(output.contains("Scan_Carton_No"));
    assert!(output.contains("STYLE2:WHT"));
    assert_eq!(scan_loop.session().scan_count(), 0);
}

#[test]
fn open_fails_for_unknown_invoice() {
    let file = write_csv(PACKING_LIST);
    let loader = CachedLoader::new(
        SourceLoader::new().unwrap(),
        DataSource::File {
            path: file.path().to_path_buf(),
        },
    );
    let error = ScanLoop::open(loader, "NOPE", SessionOptions::default())
        .err()
        .unwrap();
    assert!(format!("{error:#}").contains("NOPE"));
}

#[test]
fn invoices_command_lists_every_invoice() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");

    let output = drive(&mut scan_loop, ":invoices\n");

    assert!(output.contains("C-INV"));
    assert!(output.contains("INV-B"));
    assert_eq!(scan_loop.session().invoice_no(), "INV-A");
}

#[test]
fn reload_picks_up_new_rows() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");
    std::fs::write(
        file.path(),
        format!("{PACKING_LIST}1004,INV-A,SKU5,STYLE3,RED,,5\n"),
    )
    .unwrap();

    let output = drive(&mut scan_loop, "1001\n:reload\n1004\n");

    assert!(output.contains("Total Cartons: 4"));
    assert!(output.contains("Pallet - 3.1"));
    assert_eq!(scan_loop.session().total_cartons(), 4);
    assert_eq!(scan_loop.session().scan_count(), 1);
}

#[test]
fn failed_reload_keeps_current_session() {
    let file = write_csv(PACKING_LIST);
    let mut scan_loop = open(&file, "INV-A");
    std::fs::write(
        file.path(),
        "CONTAINER_ID,C-INVC-NO,ITEM,VPN,DIFF_1,DIFF_2,PRICE\n",
    )
    .unwrap();

    let output = drive(&mut scan_loop, "1001\n:reload\n");

    assert!(output.contains("error: The packing list is empty."));
    assert_eq!(scan_loop.session().invoice_no(), "INV-A");
    assert_eq!(scan_loop.session().scan_count(), 1);
    assert_eq!(scan_loop.session().total_cartons(), 3);
}
