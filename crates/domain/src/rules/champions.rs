//! Champion pool.

use crate::entities::Candidate;
use crate::pool::CandidatePool;
use crate::sampler::draw_one;
use crate::selection::ChampionPick;

/// Every champion in the catalog is legal.
pub fn champion_pool(champions: &[Candidate]) -> CandidatePool {
    CandidatePool::all("champions", champions)
}

pub fn draw_champion(pool: &CandidatePool, pick: &mut dyn FnMut(usize) -> usize) -> ChampionPick {
    ChampionPick::new(draw_one(pool.candidates(), pick))
}
