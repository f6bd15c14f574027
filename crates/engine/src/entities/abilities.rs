//! Summoner ability selector.

use riftroll_domain::{AbilityContext, AbilityPair, AbilityPools, CandidateCatalog};

use super::selector::{RollDomain, Selector};

#[derive(Debug, Clone, Copy, Default)]
pub struct AbilitiesDomain;

impl RollDomain for AbilitiesDomain {
    const NAME: &'static str = "abilities";

    type Context = AbilityContext;
    type Pools = AbilityPools;
    type Output = AbilityPair;

    fn build_pools(&self, catalog: &CandidateCatalog, context: &AbilityContext) -> AbilityPools {
        AbilityPools::build(&catalog.abilities, context)
    }

    fn draw(&self, pools: &AbilityPools, pick: &mut dyn FnMut(usize) -> usize) -> AbilityPair {
        pools.draw(pick)
    }
}

pub type AbilitySelector = Selector<AbilitiesDomain>;
