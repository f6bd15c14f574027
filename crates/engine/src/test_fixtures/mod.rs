//! Test fixtures loader for JSON fixture files and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{ready_selector, sample_catalog};
//!
//! #[tokio::test]
//! async fn rolls_a_champion() {
//!     let selector = ready_selector(ChampionDomain, FixedRandom::constant(0), RollSettings::default());
//!     // ... test logic
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use riftroll_domain::{CandidateCatalog, Catalog};

use crate::entities::{RollDomain, Selector};
use crate::infrastructure::app_settings::RollSettings;
use crate::infrastructure::clock::FixedRandom;
use crate::infrastructure::ports::{RandomPort, TickerPort};
use crate::infrastructure::ticker::ImmediateTicker;
use crate::roll::RollAnimator;

// =============================================================================
// Fixture Loading
// =============================================================================

/// Load a JSON fixture from the test_data/ directory.
///
/// # Panics
///
/// Panics if the fixture file cannot be read or parsed.
pub fn load_fixture<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(path);
    let raw = std::fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", fixture_path.display(), e));
    serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", fixture_path.display(), e))
}

/// Small but complete catalog: four champions, a smite ability listed
/// first, four rune trees, nine stat shards and a rift item list.
pub fn sample_catalog() -> Catalog {
    load_fixture("catalog.json")
}

pub fn candidate_catalog() -> Arc<CandidateCatalog> {
    Arc::new(sample_catalog().into_candidates().unwrap())
}

// =============================================================================
// Selectors
// =============================================================================

pub fn selector<D: RollDomain>(
    domain: D,
    random: Arc<dyn RandomPort>,
    ticker: Arc<dyn TickerPort>,
    settings: RollSettings,
) -> Selector<D> {
    Selector::new(domain, random, RollAnimator::new(ticker, settings))
}

/// Selector loaded with [`candidate_catalog`], ticking without delay.
pub fn ready_selector<D: RollDomain>(
    domain: D,
    random: FixedRandom,
    settings: RollSettings,
) -> Selector<D> {
    let selector = selector(domain, Arc::new(random), Arc::new(ImmediateTicker), settings);
    selector.load(candidate_catalog());
    selector
}
