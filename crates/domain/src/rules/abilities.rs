//! Summoner ability pools.
//!
//! Abilities are limited to the classic game mode. The role mode decides
//! whether smite-like abilities are forced, excluded or left to chance.

use crate::entities::Candidate;
use crate::pool::{CandidatePool, PoolPredicate};
use crate::sampler::draw_distinct_pair;
use crate::selection::AbilityPair;
use crate::value_objects::RoleMode;

/// Mode abilities must be eligible in. Abilities list game modes as maps.
pub const CLASSIC_MODE: &str = "CLASSIC";

/// Tag marking a smite-like ability.
pub const SMITE_TAG: &str = "Smite";

pub fn is_smite_like(candidate: &Candidate) -> bool {
    candidate.has_tag(SMITE_TAG)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityContext {
    pub role: RoleMode,
}

impl AbilityContext {
    pub fn new(role: RoleMode) -> Self {
        Self { role }
    }
}

/// Pools for the first and second ability slot.
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityPools {
    first: CandidatePool,
    second: CandidatePool,
}

impl AbilityPools {
    pub fn build(abilities: &[Candidate], context: &AbilityContext) -> Self {
        let classic = PoolPredicate::new().on_map(CLASSIC_MODE);
        match context.role {
            RoleMode::Fill => {
                let all = CandidatePool::derive("abilities", abilities, classic);
                Self {
                    first: all.clone(),
                    second: all,
                }
            }
            RoleMode::Lane | RoleMode::Support => {
                let no_smite =
                    CandidatePool::derive("abilities:no-smite", abilities, classic.not_tagged(SMITE_TAG));
                Self {
                    first: no_smite.clone(),
                    second: no_smite,
                }
            }
            RoleMode::Jungle => {
                let smite = CandidatePool::derive(
                    "abilities:smite",
                    abilities,
                    classic.clone().tagged(SMITE_TAG),
                );
                let all = CandidatePool::derive("abilities", abilities, classic);
                // A catalog without smite still rolls a full pair.
                let first = if smite.is_empty() { all.clone() } else { smite };
                Self { first, second: all }
            }
        }
    }

    pub fn first(&self) -> &CandidatePool {
        &self.first
    }

    pub fn second(&self) -> &CandidatePool {
        &self.second
    }

    pub fn draw(&self, pick: &mut dyn FnMut(usize) -> usize) -> AbilityPair {
        let (a, b) = draw_distinct_pair(self.first.candidates(), self.second.candidates(), pick);
        AbilityPair::new(a, b)
    }
}
