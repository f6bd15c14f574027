//! Item build selector.

use riftroll_domain::{CandidateCatalog, ItemBuild, ItemContext, ItemPools, ItemRules};

use super::selector::{RollDomain, Selector};

#[derive(Debug, Clone, Default)]
pub struct ItemsDomain {
    rules: ItemRules,
}

impl ItemsDomain {
    pub fn new(rules: ItemRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ItemRules {
        &self.rules
    }
}

impl RollDomain for ItemsDomain {
    const NAME: &'static str = "items";

    type Context = ItemContext;
    type Pools = ItemPools;
    type Output = ItemBuild;

    fn build_pools(&self, catalog: &CandidateCatalog, context: &ItemContext) -> ItemPools {
        self.rules.build_pools(&catalog.items, context)
    }

    fn draw(&self, pools: &ItemPools, pick: &mut dyn FnMut(usize) -> usize) -> ItemBuild {
        pools.draw(pick)
    }
}

pub type ItemSelector = Selector<ItemsDomain>;
