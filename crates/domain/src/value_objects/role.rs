//! Role mode picked by the player before rolling.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which position the loadout is rolled for.
///
/// Governs the starter-item pool and which summoner abilities are offered.
/// `Fill` means "any position" and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleMode {
    #[default]
    Fill,
    Lane,
    Jungle,
    Support,
}

impl RoleMode {
    pub fn all() -> &'static [RoleMode] {
        &[
            RoleMode::Fill,
            RoleMode::Lane,
            RoleMode::Jungle,
            RoleMode::Support,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleMode::Fill => "fill",
            RoleMode::Lane => "lane",
            RoleMode::Jungle => "jungle",
            RoleMode::Support => "support",
        }
    }

    /// Toggle semantics of the role picker: choosing the active role again
    /// clears it back to `Fill`.
    pub fn toggle(self, chosen: RoleMode) -> RoleMode {
        if self == chosen {
            RoleMode::Fill
        } else {
            chosen
        }
    }
}

impl fmt::Display for RoleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fill" | "all" | "" => Ok(RoleMode::Fill),
            "lane" | "top" | "mid" | "bot" => Ok(RoleMode::Lane),
            "jungle" => Ok(RoleMode::Jungle),
            "support" => Ok(RoleMode::Support),
            other => Err(DomainError::parse(format!("Unknown role mode: '{}'", other))),
        }
    }
}
