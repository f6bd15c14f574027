//! Committed selection results.
//!
//! Each selector produces one of these fixed-shape records. `Default` is the
//! "nothing rolled yet" sentinel; every slot is optional because an empty
//! pool is a normal outcome.

use serde::{Deserialize, Serialize};

use crate::entities::Candidate;
use crate::rules::abilities::is_smite_like;

/// Number of main-item slots in a build.
pub const MAIN_ITEM_SLOTS: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionPick {
    pub champion: Option<Candidate>,
}

impl ChampionPick {
    pub fn new(champion: Option<Candidate>) -> Self {
        Self { champion }
    }
}

/// The two summoner abilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityPair {
    pub a: Option<Candidate>,
    pub b: Option<Candidate>,
}

impl AbilityPair {
    pub fn new(a: Option<Candidate>, b: Option<Candidate>) -> Self {
        Self { a, b }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.a.iter().chain(self.b.iter())
    }

    pub fn has_smite(&self) -> bool {
        self.iter().any(is_smite_like)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryTree {
    pub tree: Option<Candidate>,
    pub keystone: Option<Candidate>,
    pub minors: [Option<Candidate>; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryTree {
    pub tree: Option<Candidate>,
    pub minors: [Option<Candidate>; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunePage {
    pub primary: PrimaryTree,
    pub secondary: SecondaryTree,
    pub stats: [Option<Candidate>; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBuild {
    pub start: Option<Candidate>,
    pub boots: Option<Candidate>,
    pub main: [Option<Candidate>; MAIN_ITEM_SLOTS],
}

impl ItemBuild {
    /// Every filled slot, starter first.
    pub fn items(&self) -> impl Iterator<Item = &Candidate> {
        self.start
            .iter()
            .chain(self.boots.iter())
            .chain(self.main.iter().flatten())
    }
}

/// A finished loadout, the record handed to persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutRecord {
    pub champion: ChampionPick,
    pub abilities: AbilityPair,
    pub runes: RunePage,
    pub items: ItemBuild,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_build_has_six_empty_main_slots() {
        let build = ItemBuild::default();
        assert_eq!(build.main.len(), MAIN_ITEM_SLOTS);
        assert_eq!(build.items().count(), 0);
    }

    #[test]
    fn empty_slots_serialize_as_null() {
        let build = ItemBuild {
            start: Some(Candidate::new("1055", "Doran's Blade")),
            ..ItemBuild::default()
        };
        let json = serde_json::to_value(&build).unwrap();
        assert_eq!(json["boots"], serde_json::Value::Null);
        assert_eq!(json["main"].as_array().unwrap().len(), MAIN_ITEM_SLOTS);
        assert!(json["main"][0].is_null());
    }

    #[test]
    fn smite_is_detected_in_either_slot() {
        let smite = Candidate::new("SummonerSmite", "Smite").with_tag("Smite");
        let flash = Candidate::new("SummonerFlash", "Flash");
        assert!(AbilityPair::new(Some(flash.clone()), Some(smite)).has_smite());
        assert!(!AbilityPair::new(Some(flash), None).has_smite());
    }
}
