//! Attack range of a champion, and the range an item is restricted to.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Melee or ranged.
///
/// On a champion this is its own attack range. On an item it is the only
/// range of champion allowed to buy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    Melee,
    Ranged,
}

impl RangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKind::Melee => "melee",
            RangeKind::Ranged => "ranged",
        }
    }
}

impl fmt::Display for RangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "melee" => Ok(RangeKind::Melee),
            "ranged" | "range" => Ok(RangeKind::Ranged),
            other => Err(DomainError::parse(format!("Unknown range: '{}'", other))),
        }
    }
}
