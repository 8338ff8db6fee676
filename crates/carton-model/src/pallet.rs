use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CartonError;
use crate::record::StyleColor;

/// Pallet label in `<group>.<sub>` form.
///
/// `group` numbers the style/colour group, `sub` the distinct item inside it.
/// Both start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PalletLabel {
    pub group: u32,
    pub sub: u32,
}

impl PalletLabel {
    pub const fn new(group: u32, sub: u32) -> Self {
        Self { group, sub }
    }
}

impl fmt::Display for PalletLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.sub)
    }
}

impl FromStr for PalletLabel {
    type Err = CartonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CartonError::InvalidLabel(s.to_string());
        let (group, sub) = s.trim().split_once('.').ok_or_else(invalid)?;
        let group: u32 = group.parse().map_err(|_| invalid())?;
        let sub: u32 = sub.parse().map_err(|_| invalid())?;
        if group == 0 || sub == 0 {
            return Err(invalid());
        }
        Ok(Self { group, sub })
    }
}

/// One row of the pallet plan: which label a (style, colour, item) goes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletAllocation {
    pub label: PalletLabel,
    pub key: StyleColor,
    pub item: String,
}

impl PalletAllocation {
    pub fn group(&self) -> u32 {
        self.label.group
    }

    pub fn sub(&self) -> u32 {
        self.label.sub
    }
}
