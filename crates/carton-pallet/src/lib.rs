//! Pallet grouping and scan verification.
//!
//! For one invoice, cartons are grouped by style and primary colour, each
//! group is numbered, and each distinct item inside a group gets a
//! sub-number. The resulting `<group>.<sub>` label tells the operator which
//! pallet a scanned carton belongs on.

mod error;
pub mod grouping;
pub mod index;
pub mod session;
pub mod verify;

pub use error::{PalletError, Result};
pub use grouping::{GroupOrder, PalletPlan};
pub use index::{ContainerIndex, Lookup, LookupVia};
pub use session::{DEFAULT_HISTORY_CAPACITY, DEFAULT_RECENT_LIMIT, ScanSession, SessionOptions};
pub use verify::{item_info, verify_scan};
