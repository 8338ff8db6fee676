//! Shipment rows and the style/colour key cartons are grouped by.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::UNKNOWN_COLOR;

/// One carton line of the supplier packing list.
///
/// All text fields are stored trimmed. A container can appear on several
/// rows when it carries more than one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Container barcode as printed on the carton.
    pub container_id: String,
    /// Customer invoice (C-INV) the carton ships under.
    pub invoice_no: String,
    /// Item code.
    pub item: String,
    /// Vendor style number.
    pub vpn: String,
    /// Primary colour code, `UNKNOWN` when the sheet leaves it blank.
    pub diff_1: String,
    /// Secondary colour/variant code, empty when absent.
    pub diff_2: String,
    /// Unit price, if the sheet carries one.
    pub price: Option<f64>,
}

impl ShipmentRecord {
    pub fn new(
        container_id: impl AsRef<str>,
        invoice_no: impl AsRef<str>,
        item: impl AsRef<str>,
        vpn: impl AsRef<str>,
    ) -> Self {
        Self {
            container_id: container_id.as_ref().trim().to_string(),
            invoice_no: invoice_no.as_ref().trim().to_string(),
            item: item.as_ref().trim().to_string(),
            vpn: vpn.as_ref().trim().to_string(),
            diff_1: UNKNOWN_COLOR.to_string(),
            diff_2: String::new(),
            price: None,
        }
    }

    /// Set the colour attributes, applying the blank-value defaults.
    #[must_use]
    pub fn with_colors(mut self, diff_1: Option<&str>, diff_2: Option<&str>) -> Self {
        self.diff_1 = diff_1
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_COLOR)
            .to_string();
        self.diff_2 = diff_2.map(str::trim).unwrap_or_default().to_string();
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }

    /// Normalized scan code for this row's container.
    pub fn scan_code(&self) -> String {
        normalize_code(&self.container_id)
    }

    /// The key the carton is palletised under.
    pub fn style_color(&self) -> StyleColor {
        StyleColor::new(&self.vpn, &self.diff_1)
    }

    /// Key using the secondary colour prefix (`DIFF_2 + DIFF_1`).
    ///
    /// Falls back to the primary key when DIFF_2 is empty.
    pub fn alternate_style_color(&self) -> StyleColor {
        if self.diff_2.is_empty() {
            self.style_color()
        } else {
            StyleColor::new(&self.vpn, format!("{}{}", self.diff_2, self.diff_1))
        }
    }
}

/// Style (VPN) and colour pair identifying a pallet group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleColor {
    pub style: String,
    pub color: String,
}

impl StyleColor {
    pub fn new(style: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            color: color.into(),
        }
    }

    /// Combined key in `VPN:COLOR` form.
    pub fn combined(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.style, self.color)
    }
}

/// Normalize a scanned or stored container code for lookup.
///
/// Scanners may pad with whitespace and operators may type lowercase.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}
