//! Champion selector.

use riftroll_domain::rules::champions::{champion_pool, draw_champion};
use riftroll_domain::{CandidateCatalog, CandidatePool, ChampionPick};

use super::selector::{RollDomain, Selector};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChampionDomain;

impl RollDomain for ChampionDomain {
    const NAME: &'static str = "champion";

    type Context = ();
    type Pools = CandidatePool;
    type Output = ChampionPick;

    fn build_pools(&self, catalog: &CandidateCatalog, _context: &()) -> CandidatePool {
        champion_pool(&catalog.champions)
    }

    fn draw(&self, pools: &CandidatePool, pick: &mut dyn FnMut(usize) -> usize) -> ChampionPick {
        draw_champion(pools, pick)
    }
}

pub type ChampionSelector = Selector<ChampionDomain>;
