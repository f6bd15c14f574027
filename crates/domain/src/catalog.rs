//! Catalog shapes as delivered by a catalog provider, and their conversion
//! into candidates.
//!
//! Provider-specific parsing (locale files, version lookups) happens before
//! this point; these structs are the normalized exchange format.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::Candidate;
use crate::error::DomainError;
use crate::rules::runes::{RuneBook, RuneTree};
use crate::value_objects::RangeKind;

fn default_in_store() -> bool {
    true
}

/// One catalog entry. Champions, abilities, runes, shards and items share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub unique_effects: Vec<String>,
    #[serde(default)]
    pub maps: Vec<String>,
    #[serde(default = "default_in_store")]
    pub in_store: bool,
    #[serde(default)]
    pub range: Option<String>,
    /// Game modes an ability is available in.
    #[serde(default)]
    pub modes: Vec<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: Vec::new(),
            cost: None,
            group: None,
            unique_effects: Vec::new(),
            maps: Vec::new(),
            in_store: true,
            range: None,
            modes: Vec::new(),
        }
    }

    /// Convert into a candidate. The group is kept only when `keep_group`
    /// accepts it. Modes are folded into the eligible maps; map ids are
    /// numeric and mode names are not, so the two never collide.
    pub fn to_candidate(&self, keep_group: &dyn Fn(&str) -> bool) -> Result<Candidate, DomainError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(DomainError::validation("Catalog entry id cannot be empty"));
        }
        let name = if self.name.trim().is_empty() {
            id
        } else {
            self.name.trim()
        };

        let mut candidate = Candidate::new(id, name)
            .with_tags(self.tags.iter().cloned())
            .with_maps(self.maps.iter().chain(self.modes.iter()).map(String::as_str))
            .with_purchasable(self.in_store);

        if let Some(cost) = self.cost {
            let cost = u32::try_from(cost)
                .map_err(|_| DomainError::invalid_entry(id, format!("cost out of range: {cost}")))?;
            candidate = candidate.with_cost(cost);
        }
        if let Some(group) = self.group.as_deref().filter(|g| keep_group(g)) {
            candidate = candidate.with_exclusivity_group(group);
        }
        for effect in &self.unique_effects {
            candidate = candidate.with_unique_effect(effect.as_str());
        }
        if let Some(range) = &self.range {
            let range: RangeKind = range
                .parse()
                .map_err(|e: DomainError| DomainError::invalid_entry(id, e.to_string()))?;
            candidate = candidate.with_range(range);
        }
        Ok(candidate)
    }
}

/// `MaxGroupOwnable` arrives as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupLimit {
    Count(i64),
    Text(String),
}

impl GroupLimit {
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroupEntry {
    pub id: String,
    #[serde(default, alias = "MaxGroupOwnable")]
    pub max_group_ownable: Option<GroupLimit>,
}

impl ItemGroupEntry {
    /// A group is limited when its limit parses to a non-negative number.
    pub fn is_limited(&self) -> bool {
        self.max_group_ownable
            .as_ref()
            .and_then(GroupLimit::value)
            .is_some_and(|n| n >= 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneSlotEntry {
    #[serde(default)]
    pub runes: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuneTreeEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slots: Vec<RuneSlotEntry>,
}

/// Everything a catalog provider delivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub champions: Vec<CatalogEntry>,
    #[serde(default)]
    pub abilities: Vec<CatalogEntry>,
    #[serde(default)]
    pub rune_trees: Vec<RuneTreeEntry>,
    #[serde(default)]
    pub stat_shards: Vec<CatalogEntry>,
    #[serde(default)]
    pub items: Vec<CatalogEntry>,
    #[serde(default)]
    pub item_groups: Vec<ItemGroupEntry>,
}

/// Catalog converted into candidates, one list per domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateCatalog {
    pub champions: Vec<Candidate>,
    pub abilities: Vec<Candidate>,
    pub runes: RuneBook,
    pub items: Vec<Candidate>,
}

fn convert(entries: &[CatalogEntry], keep_group: &dyn Fn(&str) -> bool) -> Result<Vec<Candidate>, DomainError> {
    entries.iter().map(|e| e.to_candidate(keep_group)).collect()
}

impl Catalog {
    pub fn into_candidates(&self) -> Result<CandidateCatalog, DomainError> {
        let limited: BTreeSet<&str> = self
            .item_groups
            .iter()
            .filter(|g| g.is_limited())
            .map(|g| g.id.as_str())
            .collect();

        let trees = self
            .rune_trees
            .iter()
            .map(|tree| {
                let rows = tree
                    .slots
                    .iter()
                    .map(|slot| convert(&slot.runes, &|_| false))
                    .collect::<Result<Vec<_>, _>>()?;
                let name = if tree.name.is_empty() { &tree.id } else { &tree.name };
                if tree.id.trim().is_empty() {
                    return Err(DomainError::validation("Rune tree id cannot be empty"));
                }
                Ok(RuneTree::new(Candidate::new(tree.id.trim(), name.as_str()), rows))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(CandidateCatalog {
            champions: convert(&self.champions, &|_| false)?,
            abilities: convert(&self.abilities, &|_| false)?,
            runes: RuneBook::new(trees, convert(&self.stat_shards, &|_| true)?),
            items: convert(&self.items, &|group| limited.contains(group))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MapId;

    const CATALOG: &str = r#"{
        "champions": [
            { "id": "Ahri", "name": "Ahri", "range": "ranged" },
            { "id": "Garen", "name": "Garen", "range": "melee" }
        ],
        "abilities": [
            { "id": "SummonerFlash", "name": "Flash", "modes": ["CLASSIC", "ARAM"] },
            { "id": "SummonerSmite", "name": "Smite", "tags": ["Smite"], "modes": ["CLASSIC"] }
        ],
        "runeTrees": [
            { "id": "8000", "name": "Precision", "slots": [
                { "runes": [{ "id": "8005", "name": "Press the Attack" }] },
                { "runes": [{ "id": "9101", "name": "Absorb Life" }] }
            ] }
        ],
        "statShards": [
            { "id": "5008", "name": "Adaptive Force", "group": "offense" }
        ],
        "items": [
            { "id": "3157", "name": "Zhonya's Hourglass", "cost": 3250, "group": "Stasis",
              "maps": ["11"], "uniqueEffects": ["Stasis"] },
            { "id": "3078", "name": "Trinity Force", "cost": 3333, "group": "Sheen", "maps": ["11"] },
            { "id": "3400", "name": "Your Cut", "inStore": false }
        ],
        "itemGroups": [
            { "id": "Stasis", "MaxGroupOwnable": "1" },
            { "id": "Sheen", "maxGroupOwnable": "-1" }
        ]
    }"#;

    fn parsed() -> CandidateCatalog {
        serde_json::from_str::<Catalog>(CATALOG)
            .unwrap()
            .into_candidates()
            .unwrap()
    }

    #[test]
    fn only_limited_item_groups_become_exclusivity_groups() {
        let catalog = parsed();
        let zhonya = &catalog.items[0];
        let trinity = &catalog.items[1];
        assert_eq!(zhonya.exclusivity_group(), Some("Stasis"));
        assert!(zhonya.unique_effect_ids().contains("Stasis"));
        assert_eq!(trinity.exclusivity_group(), None);
        assert!(zhonya.is_eligible_on(&MapId::summoners_rift()));
    }

    #[test]
    fn in_store_defaults_to_true() {
        let catalog = parsed();
        assert!(catalog.items[0].is_purchasable());
        assert!(!catalog.items[2].is_purchasable());
    }

    #[test]
    fn ability_modes_become_eligibility() {
        let catalog = parsed();
        assert!(catalog.abilities[0].is_eligible_on(&MapId::from("CLASSIC")));
        assert!(catalog.abilities[1].has_tag("Smite"));
    }

    #[test]
    fn rune_rows_and_shards_are_grouped() {
        let catalog = parsed();
        let tree = &catalog.runes.trees()[0];
        assert_eq!(tree.tree().name(), "Precision");
        assert_eq!(tree.keystones()[0].exclusivity_group(), Some("8000:0"));
        assert_eq!(catalog.runes.stat_shards()[0].exclusivity_group(), Some("offense"));
    }

    #[test]
    fn champion_range_is_parsed() {
        let catalog = parsed();
        assert_eq!(catalog.champions[0].range_constraint(), Some(RangeKind::Ranged));
        assert_eq!(catalog.champions[1].range_constraint(), Some(RangeKind::Melee));
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let empty_id = CatalogEntry::new("  ", "Nothing");
        assert!(matches!(
            empty_id.to_candidate(&|_| true),
            Err(DomainError::Validation(_))
        ));

        let mut negative = CatalogEntry::new("1", "Refund");
        negative.cost = Some(-5);
        assert!(matches!(
            negative.to_candidate(&|_| true),
            Err(DomainError::InvalidEntry { .. })
        ));

        let mut bad_range = CatalogEntry::new("2", "Sling");
        bad_range.range = Some("orbital".into());
        assert!(matches!(
            bad_range.to_candidate(&|_| true),
            Err(DomainError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn group_limit_accepts_numbers_and_strings() {
        assert_eq!(GroupLimit::Count(2).value(), Some(2));
        assert_eq!(GroupLimit::Text(" 1 ".into()).value(), Some(1));
        assert_eq!(GroupLimit::Text("many".into()).value(), None);
    }
}
