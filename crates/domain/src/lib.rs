pub mod catalog;
pub mod constraint;
pub mod entities;
pub mod error;
pub mod ids;
pub mod pool;
pub mod rules;
pub mod sampler;
pub mod selection;
pub mod value_objects;

pub use entities::Candidate;
pub use error::DomainError;

// Re-export ID types
pub use ids::{CandidateId, LoadoutId, MapId};

// Re-export pool and constraint types
pub use constraint::{ConstraintSet, SelectionConstraint};
pub use pool::{CandidatePool, Membership, PoolPredicate};

// Re-export catalog shapes
pub use catalog::{
    CandidateCatalog, Catalog, CatalogEntry, GroupLimit, ItemGroupEntry, RuneSlotEntry,
    RuneTreeEntry,
};

// Re-export rule types
pub use rules::{
    AbilityContext, AbilityPools, ChampionRule, ItemContext, ItemPools, ItemRules, RuneBook,
    RuneTree,
};

// Re-export selection results
pub use selection::{
    AbilityPair, ChampionPick, ItemBuild, LoadoutRecord, PrimaryTree, RunePage, SecondaryTree,
    MAIN_ITEM_SLOTS,
};

pub use value_objects::{RangeKind, RoleMode};
