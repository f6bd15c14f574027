//! Item pool rules.
//!
//! Item legality depends on the map, the starter role, the champion's attack
//! range and per-champion special cases. [`ItemContext`] captures the part
//! that changes between rolls; [`ItemRules`] the part that does not.

use std::collections::BTreeSet;

use crate::constraint::ConstraintSet;
use crate::entities::Candidate;
use crate::ids::{CandidateId, MapId};
use crate::pool::{CandidatePool, PoolPredicate};
use crate::sampler::{draw_many, draw_one};
use crate::selection::{AbilityPair, ChampionPick, ItemBuild, MAIN_ITEM_SLOTS};
use crate::value_objects::{RangeKind, RoleMode};

pub const BOOTS_TAG: &str = "Boots";
pub const JUNGLE_TAG: &str = "Jungle";
pub const SUPPORT_TAG: &str = "GoldPer";

/// Maps whose items are not rift-only (arena and alternate modes).
pub const NON_RIFT_MAPS: [&str; 3] = ["30", "33", "35"];

/// Per-champion exception to the item rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionRule {
    pub champion_id: CandidateId,
    pub forbid_boots: bool,
    pub forbid_item_ids: BTreeSet<CandidateId>,
}

impl ChampionRule {
    pub fn no_boots(champion_id: impl Into<CandidateId>) -> Self {
        Self {
            champion_id: champion_id.into(),
            forbid_boots: true,
            forbid_item_ids: BTreeSet::new(),
        }
    }

    pub fn forbidding<I>(champion_id: impl Into<CandidateId>, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CandidateId>,
    {
        Self {
            champion_id: champion_id.into(),
            forbid_boots: false,
            forbid_item_ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

fn ids(values: &[&str]) -> BTreeSet<CandidateId> {
    values.iter().map(|v| CandidateId::from(*v)).collect()
}

/// Static item rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRules {
    pub starter_ids: BTreeSet<CandidateId>,
    pub lane_starter_ids: BTreeSet<CandidateId>,
    pub jungle_starter_ids: BTreeSet<CandidateId>,
    pub boots_min_cost: u32,
    pub boots_max_cost: u32,
    pub main_min_cost: u32,
    pub champion_rules: Vec<ChampionRule>,
}

impl Default for ItemRules {
    fn default() -> Self {
        Self {
            starter_ids: ids(&["1054", "1055", "1056", "1082", "3070", "2033", "2031", "1039", "1036"]),
            lane_starter_ids: ids(&["1054", "1055", "1056", "1082", "3070", "2033", "2031"]),
            jungle_starter_ids: ids(&["1039", "1036"]),
            boots_min_cost: 900,
            boots_max_cost: 1250,
            main_min_cost: 2000,
            champion_rules: vec![ChampionRule::no_boots("Cassiopeia")],
        }
    }
}

impl ItemRules {
    pub fn rule_for(&self, champion_id: &CandidateId) -> Option<&ChampionRule> {
        self.champion_rules
            .iter()
            .find(|rule| &rule.champion_id == champion_id)
    }

    fn rift_only(&self) -> PoolPredicate {
        NON_RIFT_MAPS
            .iter()
            .fold(PoolPredicate::new().on_map(MapId::summoners_rift()), |p, map| {
                p.not_on_map(*map)
            })
    }

    /// Starter predicate for one role, before champion restrictions.
    pub fn starter_predicate(&self, role: RoleMode) -> PoolPredicate {
        let rift = self.rift_only();
        match role {
            RoleMode::Fill => rift.one_of(self.starter_ids.iter().cloned()),
            RoleMode::Lane => rift.one_of(self.lane_starter_ids.iter().cloned()),
            RoleMode::Jungle => rift
                .one_of(self.jungle_starter_ids.iter().cloned())
                .or_tagged(JUNGLE_TAG),
            RoleMode::Support => rift.or_tagged(SUPPORT_TAG),
        }
    }

    pub fn role_pool(&self, items: &[Candidate], role: RoleMode) -> CandidatePool {
        CandidatePool::derive(format!("items:start:{role}"), items, self.starter_predicate(role))
    }

    pub fn boots_predicate(&self) -> PoolPredicate {
        PoolPredicate::new()
            .on_map(MapId::summoners_rift())
            .tagged(BOOTS_TAG)
            .purchasable()
            .cost_between(self.boots_min_cost, self.boots_max_cost)
    }

    pub fn main_predicate(&self) -> PoolPredicate {
        self.rift_only()
            .cost_at_least(self.main_min_cost)
            .not_tagged(BOOTS_TAG)
            .excluding(self.starter_ids.iter().cloned())
    }

    /// Derive every item pool for `context`.
    pub fn build_pools(&self, items: &[Candidate], context: &ItemContext) -> ItemPools {
        let restrict = |predicate: PoolPredicate| {
            let predicate = predicate.excluding(context.forbidden_ids.iter().cloned());
            match context.champion_range {
                Some(range) => predicate.usable_by(range),
                None => predicate,
            }
        };

        let starters = CandidatePool::derive(
            format!("items:start:{}", context.starter_role),
            items,
            restrict(self.starter_predicate(context.starter_role)),
        );
        let boots = if context.forbid_boots {
            CandidatePool::empty("items:boots")
        } else {
            CandidatePool::derive("items:boots", items, restrict(self.boots_predicate()))
        };
        let main = CandidatePool::derive("items:main", items, restrict(self.main_predicate()));

        ItemPools {
            starters,
            boots,
            main,
            boots_from_main: context.forbid_boots,
        }
    }
}

/// Inputs to item pool derivation that change from roll to roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContext {
    pub starter_role: RoleMode,
    pub champion_range: Option<RangeKind>,
    pub forbid_boots: bool,
    pub forbidden_ids: BTreeSet<CandidateId>,
}

impl ItemContext {
    /// Owning a smite-like ability moves the starter slot to the jungle pool
    /// whatever the chosen role.
    pub fn derive(
        role: RoleMode,
        champion: &ChampionPick,
        abilities: &AbilityPair,
        rules: &ItemRules,
    ) -> Self {
        let starter_role = if abilities.has_smite() {
            RoleMode::Jungle
        } else {
            role
        };
        let champion = champion.champion.as_ref();
        let rule = champion.and_then(|c| rules.rule_for(c.id()));

        Self {
            starter_role,
            champion_range: champion.and_then(Candidate::range_constraint),
            forbid_boots: rule.is_some_and(|r| r.forbid_boots),
            forbidden_ids: rule.map(|r| r.forbid_item_ids.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemPools {
    starters: CandidatePool,
    boots: CandidatePool,
    main: CandidatePool,
    boots_from_main: bool,
}

impl ItemPools {
    pub fn empty() -> Self {
        Self {
            starters: CandidatePool::empty("items:start"),
            boots: CandidatePool::empty("items:boots"),
            main: CandidatePool::empty("items:main"),
            boots_from_main: false,
        }
    }

    pub fn starters(&self) -> &CandidatePool {
        &self.starters
    }

    pub fn boots(&self) -> &CandidatePool {
        &self.boots
    }

    pub fn main(&self) -> &CandidatePool {
        &self.main
    }

    pub fn draw(&self, pick: &mut dyn FnMut(usize) -> usize) -> ItemBuild {
        let start = draw_one(self.starters.candidates(), pick);
        let constraints = ConstraintSet::exclusive();

        if self.boots_from_main {
            // One extra main item stands in for boots.
            let mut picks = draw_many(self.main.candidates(), MAIN_ITEM_SLOTS + 1, &constraints, pick)
                .into_iter();
            let main = std::array::from_fn(|_| picks.next().flatten());
            let boots = picks.next().flatten();
            return ItemBuild { start, boots, main };
        }

        let boots = draw_one(self.boots.candidates(), pick);
        let mut picks = draw_many(self.main.candidates(), MAIN_ITEM_SLOTS, &constraints, pick).into_iter();
        let main = std::array::from_fn(|_| picks.next().flatten());
        ItemBuild { start, boots, main }
    }
}
