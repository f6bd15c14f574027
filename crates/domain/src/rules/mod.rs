//! Game legality rules: how each domain's pools are derived and drawn.

pub mod abilities;
pub mod champions;
pub mod items;
pub mod runes;

pub use abilities::{AbilityContext, AbilityPools};
pub use items::{ChampionRule, ItemContext, ItemPools, ItemRules};
pub use runes::{RuneBook, RuneTree};
