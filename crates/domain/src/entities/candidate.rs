//! Candidate entity - one selectable champion, ability, rune or item.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{CandidateId, MapId};
use crate::value_objects::RangeKind;

/// One selectable entity with the metadata legality rules are evaluated on.
///
/// Candidates are built once from catalog data and never mutated afterwards;
/// all selection state lives in pools and results. The `with_*` methods
/// consume the value and are meant for construction only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    id: CandidateId,
    name: String,
    display_tags: BTreeSet<String>,
    exclusivity_group: Option<String>,
    unique_effect_ids: BTreeSet<String>,
    cost: Option<u32>,
    eligible_maps: BTreeSet<MapId>,
    purchasable: bool,
    range_constraint: Option<RangeKind>,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            display_tags: BTreeSet::new(),
            exclusivity_group: None,
            unique_effect_ids: BTreeSet::new(),
            cost: None,
            eligible_maps: BTreeSet::new(),
            purchasable: true,
            range_constraint: None,
        }
    }

    // Construction

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.display_tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_exclusivity_group(mut self, group: impl Into<String>) -> Self {
        self.exclusivity_group = Some(group.into());
        self
    }

    pub fn with_unique_effect(mut self, effect: impl Into<String>) -> Self {
        self.unique_effect_ids.insert(effect.into());
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_map(mut self, map: impl Into<MapId>) -> Self {
        self.eligible_maps.insert(map.into());
        self
    }

    pub fn with_maps<I, M>(mut self, maps: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MapId>,
    {
        self.eligible_maps.extend(maps.into_iter().map(Into::into));
        self
    }

    pub fn with_purchasable(mut self, purchasable: bool) -> Self {
        self.purchasable = purchasable;
        self
    }

    pub fn with_range(mut self, range: RangeKind) -> Self {
        self.range_constraint = Some(range);
        self
    }

    // Read accessors

    pub fn id(&self) -> &CandidateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_tags(&self) -> &BTreeSet<String> {
        &self.display_tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.display_tags.contains(tag)
    }

    pub fn exclusivity_group(&self) -> Option<&str> {
        self.exclusivity_group.as_deref()
    }

    pub fn unique_effect_ids(&self) -> &BTreeSet<String> {
        &self.unique_effect_ids
    }

    pub fn cost(&self) -> Option<u32> {
        self.cost
    }

    pub fn eligible_maps(&self) -> &BTreeSet<MapId> {
        &self.eligible_maps
    }

    pub fn is_eligible_on(&self, map: &MapId) -> bool {
        self.eligible_maps.contains(map)
    }

    pub fn is_purchasable(&self) -> bool {
        self.purchasable
    }

    pub fn range_constraint(&self) -> Option<RangeKind> {
        self.range_constraint
    }

    /// Whether a champion of `range` may use this candidate.
    pub fn is_usable_by(&self, range: RangeKind) -> bool {
        self.range_constraint.map_or(true, |required| required == range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_candidate_is_purchasable_and_unconstrained() {
        let candidate = Candidate::new("1001", "Boots");
        assert!(candidate.is_purchasable());
        assert!(candidate.exclusivity_group().is_none());
        assert!(candidate.is_usable_by(RangeKind::Melee));
        assert!(candidate.is_usable_by(RangeKind::Ranged));
    }

    #[test]
    fn range_constraint_limits_usage() {
        let hydra = Candidate::new("3074", "Ravenous Hydra").with_range(RangeKind::Melee);
        assert!(hydra.is_usable_by(RangeKind::Melee));
        assert!(!hydra.is_usable_by(RangeKind::Ranged));
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let candidate = Candidate::new("3157", "Zhonya's Hourglass")
            .with_exclusivity_group("Stasis")
            .with_cost(3250);
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["exclusivityGroup"], "Stasis");
        assert_eq!(json["cost"], 3250);
        assert_eq!(json["id"], "3157");
    }
}
