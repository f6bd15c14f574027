//! Entity modules - one selector per rolled domain.
//!
//! Each module plugs a domain's pool rules into the generic [`Selector`].

pub mod abilities;
pub mod champion;
pub mod items;
pub mod runes;
pub mod selector;

pub use abilities::{AbilitiesDomain, AbilitySelector};
pub use champion::{ChampionDomain, ChampionSelector};
pub use items::{ItemSelector, ItemsDomain};
pub use runes::{RuneSelector, RunesDomain};
pub use selector::{LoadState, RollDomain, Selector};
