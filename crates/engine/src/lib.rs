//! RiftRoll Engine library.
//!
//! Stateful and async side of the loadout randomizer.
//!
//! ## Structure
//!
//! - `entities/` - One selector per rolled domain, built on the generic `Selector`
//! - `roll/` - Roll sessions and the tick-driven animator
//! - `use_cases/` - Randomize-all orchestration and loadout persistence
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod roll;
pub mod use_cases;

/// Test fixtures shared by unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
