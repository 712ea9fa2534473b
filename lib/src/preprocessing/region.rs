//! Region membership derived from the postal code.

use crate::preprocessing::encoding::OrdinalCategory;
use crate::record::PostalCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Belgian region. Derived from the postal code, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Brussels,
    Wallonia,
    Flanders,
}

impl Region {
    /// Classify a postal code.
    ///
    /// Rules are checked in order; anything not matched is Flanders.
    /// - `1000..=1299` Brussels
    /// - `1300..=1499` Wallonia (Walloon Brabant)
    /// - `4000..=7999` Wallonia
    pub fn classify(code: PostalCode) -> Region {
        match code.value() {
            1000..=1299 => Region::Brussels,
            1300..=1499 => Region::Wallonia,
            4000..=7999 => Region::Wallonia,
            _ => Region::Flanders,
        }
    }
}

// One-hot slot order: (region_Brussels, region_Wallonia, region_Flanders).
impl OrdinalCategory for Region {
    const FIELD: &'static str = "region";
    const ALL: &'static [Self] = &[Region::Brussels, Region::Wallonia, Region::Flanders];

    fn label(self) -> &'static str {
        match self {
            Region::Brussels => "Brussels",
            Region::Wallonia => "Wallonia",
            Region::Flanders => "Flanders",
        }
    }

    fn code(self) -> u32 {
        match self {
            Region::Brussels => 0,
            Region::Wallonia => 1,
            Region::Flanders => 2,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
