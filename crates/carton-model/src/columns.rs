//! Spreadsheet column names for the supplier packing list.

pub const CONTAINER_ID: &str = "CONTAINER_ID";
pub const INVOICE_NO: &str = "C-INVC-NO";
pub const ITEM: &str = "ITEM";
pub const VPN: &str = "VPN";
pub const DIFF_1: &str = "DIFF_1";
pub const DIFF_2: &str = "DIFF_2";
pub const PRICE: &str = "PRICE";

/// Columns a packing list must carry to be usable at all.
pub const REQUIRED_COLUMNS: [&str; 4] = [CONTAINER_ID, INVOICE_NO, ITEM, VPN];

/// Fallback for a missing primary colour.
pub const UNKNOWN_COLOR: &str = "UNKNOWN";
