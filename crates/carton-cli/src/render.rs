//! Terminal rendering for invoices, pallet plans and scan sessions.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use carton_ingest::InvoiceSummary;
use carton_model::{ItemInfo, PalletAllocation, ScanReport, ScanStatus};
use carton_pallet::ScanSession;

use crate::settings::Settings;

/// Shown in place of the recent list before the first scan.
pub const NO_SCANS_MESSAGE: &str = "No scans yet...";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn invoice_table(invoices: &[InvoiceSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("C-INV"), header_cell("Cartons")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for invoice in invoices {
        table.add_row(vec![
            Cell::new(&invoice.invoice_no)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(invoice.cartons),
        ]);
    }
    table
}

pub fn pallet_table(allocations: &[PalletAllocation]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Scan_Carton_No"),
        header_cell("Main_No"),
        header_cell("Sub_No"),
        header_cell("VPNs_combined"),
        header_cell("Item"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for allocation in allocations {
        table.add_row(vec![
            Cell::new(allocation.label)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new(allocation.group()),
            Cell::new(allocation.sub()),
            Cell::new(allocation.key.combined()),
            Cell::new(&allocation.item),
        ]);
    }
    table
}

pub fn concepts_table(settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Concept"),
        header_cell("Name"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    for (key, concept) in &settings.concepts {
        let name = match &concept.label {
            Some(label) => Cell::new(label),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(key).fg(Color::Blue).add_attribute(Attribute::Bold),
            name,
            Cell::new(concept.source.to_string()),
        ]);
    }
    table
}

/// One row of the pallet plan as exported to JSON.
#[derive(Debug, Serialize)]
pub struct PalletRow<'a> {
    #[serde(rename = "Scan_Carton_No")]
    pub scan_carton_no: String,
    #[serde(rename = "Main_No")]
    pub main_no: u32,
    #[serde(rename = "Sub_No")]
    pub sub_no: u32,
    #[serde(rename = "VPNs_combined")]
    pub vpns_combined: String,
    #[serde(rename = "Item")]
    pub item: &'a str,
}

impl<'a> From<&'a PalletAllocation> for PalletRow<'a> {
    fn from(allocation: &'a PalletAllocation) -> Self {
        Self {
            scan_carton_no: allocation.label.to_string(),
            main_no: allocation.group(),
            sub_no: allocation.sub(),
            vpns_combined: allocation.key.combined(),
            item: &allocation.item,
        }
    }
}

pub fn pallet_json(allocations: &[PalletAllocation]) -> serde_json::Result<String> {
    let rows: Vec<PalletRow<'_>> = allocations.iter().map(PalletRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

/// Batch-mode scan results, one row per input code.
pub fn scan_results_table(results: &[(String, ScanReport)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Status"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (input, report) in results {
        let status = report.display_status();
        let (r, g, b) = status.rgb();
        table.add_row(vec![
            Cell::new(input),
            Cell::new(status.label()).fg(Color::Rgb { r, g, b }),
            Cell::new(report.outcome.message()),
        ]);
    }
    table
}

/// A batch-mode scan result as exported to JSON.
#[derive(Debug, Serialize)]
pub struct ScanRow<'a> {
    pub input: &'a str,
    pub status: ScanStatus,
    pub message: String,
    #[serde(flatten)]
    pub report: &'a ScanReport,
}

pub fn scan_json(results: &[(String, ScanReport)]) -> serde_json::Result<String> {
    let rows: Vec<ScanRow<'_>> = results
        .iter()
        .map(|(input, report)| ScanRow {
            input,
            status: report.display_status(),
            message: report.outcome.message(),
            report,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Single-cell banner coloured by status.
pub fn status_banner(status: ScanStatus, message: &str) -> Table {
    let (r, g, b) = status.rgb();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
    table.add_row(vec![
        Cell::new(message)
            .fg(Color::Rgb { r, g, b })
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center),
    ]);
    align_column(&mut table, 0, CellAlignment::Center);
    table
}

pub fn item_panel(info: &ItemInfo) -> String {
    format!(
        "ITEM: {} | Total Containers: {} | Price: {}\nStyle: {} | Color: {}",
        info.item,
        info.total_containers,
        info.price_display(),
        info.style,
        info.color
    )
}

/// Recent scans, newest first, or the placeholder when there are none.
pub fn recent_lines(session: &ScanSession) -> Vec<String> {
    let lines: Vec<String> = session.recent().map(ToString::to_string).collect();
    if lines.is_empty() {
        vec![NO_SCANS_MESSAGE.to_string()]
    } else {
        lines
    }
}

/// Everything the operator sees after a scan.
pub fn session_view(session: &ScanSession) -> String {
    let mut out = String::new();
    out.push_str(&format!("Invoice: {}\n", session.invoice_no()));
    out.push_str(&format!(
        "{}\n",
        status_banner(session.status(), &session.status_message())
    ));
    if let Some(info) = session.item_info() {
        out.push_str(&item_panel(&info));
        out.push('\n');
    }
    out.push_str(&format!("Total Cartons: {}\n", session.total_cartons()));
    out.push_str("Recent scans:\n");
    for line in recent_lines(session) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
