//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Catalog data (could swap a JSON file -> a live data provider)
//! - Loadout storage (could swap memory -> a database)
//! - Clock/Random/Ticker (for testing)

mod error;
mod external;
mod testing;
pub mod types;

// =============================================================================
// External Ports
// =============================================================================
pub use external::{CatalogPort, LoadoutStore};
pub use types::SavedLoadout;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockCatalogPort, MockLoadoutStore};

#[cfg(test)]
pub use testing::{MockClockPort, MockTickerPort};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort, TickerPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{CatalogError, StoreError};
