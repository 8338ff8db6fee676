//! Scan results and the operator-facing status derived from them.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::pallet::PalletLabel;

/// Banner state shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// No scan yet for the current invoice.
    #[default]
    Ready,
    /// Carton matched its pallet.
    Success,
    /// Empty scan or mismatch.
    Danger,
    /// Container carries more than one item.
    Mixed,
}

impl ScanStatus {
    /// Banner colour as a hex triplet.
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Ready => "#3498db",
            Self::Success => "#27ae60",
            Self::Danger => "#c0392b",
            Self::Mixed => "#9b59b6",
        }
    }

    /// Banner colour as RGB components.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Ready => (0x34, 0x98, 0xdb),
            Self::Success => (0x27, 0xae, 0x60),
            Self::Danger => (0xc0, 0x39, 0x2b),
            Self::Mixed => (0x9b, 0x59, 0xb6),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Banner text before the first scan of an invoice.
pub const READY_MESSAGE: &str = "READY TO SCAN";

/// Result of verifying one scanned code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// Nothing left after trimming the input.
    Empty,
    /// Carton belongs on `label`.
    Matched { code: String, label: PalletLabel },
    /// Code is not in the container index.
    NotFound { code: String },
    /// Code is indexed but no batch rows resolve for it.
    NotInData { code: String },
    /// Carton's style/colour/item has no pallet allocation.
    NotInPallet { code: String },
}

impl ScanOutcome {
    #[must_use]
    pub fn status(&self) -> ScanStatus {
        match self {
            Self::Matched { .. } => ScanStatus::Success,
            _ => ScanStatus::Danger,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    #[must_use]
    pub fn label(&self) -> Option<PalletLabel> {
        match self {
            Self::Matched { label, .. } => Some(*label),
            _ => None,
        }
    }

    /// Normalized code the outcome refers to, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Matched { code, .. }
            | Self::NotFound { code }
            | Self::NotInData { code }
            | Self::NotInPallet { code } => Some(code),
        }
    }

    /// Banner text for the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "EMPTY SCAN".to_string(),
            Self::Matched { label, .. } => format!("Pallet - {label}"),
            Self::NotFound { code } => format!("MISMATCH: {code} not found"),
            Self::NotInData { code } => format!("MISMATCH: {code} not in data"),
            Self::NotInPallet { code } => format!("MISMATCH: {code} not found in pallet"),
        }
    }
}

/// A verified scan together with what the container holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// The container carries more than one distinct item.
    pub mixed: bool,
}

impl ScanReport {
    /// Status shown on the banner; mixed containers override the outcome.
    #[must_use]
    pub fn display_status(&self) -> ScanStatus {
        if self.mixed {
            ScanStatus::Mixed
        } else {
            self.outcome.status()
        }
    }
}

/// An entry in the scan history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub at: DateTime<Local>,
    pub code: String,
}

impl ScanEvent {
    pub fn new(at: DateTime<Local>, code: impl Into<String>) -> Self {
        Self {
            at,
            code: code.into(),
        }
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.at.format("%H:%M:%S"), self.code)
    }
}

/// Item column of the info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemDisplay {
    Single(String),
    Mixed,
}

impl fmt::Display for ItemDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(item) => f.write_str(item),
            Self::Mixed => f.write_str("MIXED"),
        }
    }
}

/// Details of the last scanned container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub code: String,
    pub item: ItemDisplay,
    /// Distinct containers in the batch carrying any of this container's items.
    pub total_containers: usize,
    pub price: Option<f64>,
    pub style: String,
    pub color: String,
}

impl ItemInfo {
    /// Price as shown to the operator.
    #[must_use]
    pub fn price_display(&self) -> String {
        match self.price {
            Some(price) => format_price(price),
            None => "N/A".to_string(),
        }
    }
}

/// Shortest text for the value as read from the sheet, no rounding.
fn format_price(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn outcome_messages() {
        let matched = ScanOutcome::Matched {
            code: "C1".to_string(),
            label: PalletLabel::new(2, 1),
        };
        assert_eq!(matched.message(), "Pallet - 2.1");
        assert_eq!(matched.status(), ScanStatus::Success);
        assert_eq!(ScanOutcome::Empty.message(), "EMPTY SCAN");
        assert_eq!(
            ScanOutcome::NotFound {
                code: "X".to_string()
            }
            .message(),
            "MISMATCH: X not found"
        );
    }

    #[test]
    fn mixed_overrides_status() {
        let report = ScanReport {
            outcome: ScanOutcome::NotInPallet {
                code: "C1".to_string(),
            },
            mixed: true,
        };
        assert_eq!(report.display_status(), ScanStatus::Mixed);
    }

    #[test]
    fn event_display_uses_clock_time() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        let event = ScanEvent::new(at, "ABC");
        assert_eq!(event.to_string(), "09:05:07 - ABC");
    }

    #[test]
    fn price_display() {
        let mut info = ItemInfo {
            code: "C1".to_string(),
            item: ItemDisplay::Mixed,
            total_containers: 1,
            price: Some(12.5),
            style: "V".to_string(),
            color: "RED".to_string(),
        };
        assert_eq!(info.price_display(), "12.5");
        info.price = Some(0.125);
        assert_eq!(info.price_display(), "0.125");
        info.price = Some(40.0);
        assert_eq!(info.price_display(), "40");
        info.price = None;
        assert_eq!(info.price_display(), "N/A");
    }
}
