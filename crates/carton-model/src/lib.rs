//! Data model for carton segregation.
//!
//! Shipment rows come from the supplier packing list; pallet labels and scan
//! outcomes are derived from them per invoice.

pub mod columns;
pub mod error;
pub mod pallet;
pub mod record;
pub mod scan;

pub use error::{CartonError, Result};
pub use pallet::{PalletAllocation, PalletLabel};
pub use record::{ShipmentRecord, StyleColor, normalize_code};
pub use scan::{
    ItemDisplay, ItemInfo, READY_MESSAGE, ScanEvent, ScanOutcome, ScanReport, ScanStatus,
};
