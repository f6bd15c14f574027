//! Rune page selector.

use riftroll_domain::{CandidateCatalog, RuneBook, RunePage};

use super::selector::{RollDomain, Selector};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunesDomain;

impl RollDomain for RunesDomain {
    const NAME: &'static str = "runes";

    type Context = ();
    type Pools = RuneBook;
    type Output = RunePage;

    fn build_pools(&self, catalog: &CandidateCatalog, _context: &()) -> RuneBook {
        catalog.runes.clone()
    }

    fn draw(&self, pools: &RuneBook, pick: &mut dyn FnMut(usize) -> usize) -> RunePage {
        pools.draw_page(pick)
    }
}

pub type RuneSelector = Selector<RunesDomain>;
