//! Application state and composition.

use std::sync::Arc;

use riftroll_domain::{ItemRules, LoadoutRecord};

use crate::entities::{
    AbilitiesDomain, AbilitySelector, ChampionDomain, ChampionSelector, ItemSelector, ItemsDomain,
    RuneSelector, RunesDomain, Selector,
};
use crate::infrastructure::{
    app_settings::AppSettings,
    clock::{SystemClock, SystemRandom},
    memory_store::InMemoryLoadoutStore,
    ports::{CatalogError, CatalogPort, ClockPort, LoadoutStore, RandomPort, TickerPort},
    ticker::TokioTicker,
};
use crate::roll::RollAnimator;
use crate::use_cases::{self, CycleMode, OrchestratorError, TriggerOutcome};

/// Main application state.
///
/// Holds the four selectors and the use cases built on them.
pub struct App {
    pub settings: AppSettings,
    pub selectors: Selectors,
    pub use_cases: UseCases,
    pub catalog: Arc<dyn CatalogPort>,
}

/// Container for the selectors, one per rolled domain.
pub struct Selectors {
    pub champion: Arc<ChampionSelector>,
    pub abilities: Arc<AbilitySelector>,
    pub runes: Arc<RuneSelector>,
    pub items: Arc<ItemSelector>,
}

/// Container for all use cases.
pub struct UseCases {
    pub randomize_all: Arc<use_cases::RandomizeAll>,
    pub loadouts: use_cases::LoadoutUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        settings: AppSettings,
        catalog: Arc<dyn CatalogPort>,
        store: Arc<dyn LoadoutStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        ticker: Arc<dyn TickerPort>,
    ) -> Result<Self, OrchestratorError> {
        let animator = || RollAnimator::new(ticker.clone(), settings.roll);
        let selectors = Selectors {
            champion: Arc::new(Selector::new(ChampionDomain, random.clone(), animator())),
            abilities: Arc::new(Selector::new(AbilitiesDomain, random.clone(), animator())),
            runes: Arc::new(Selector::new(RunesDomain, random.clone(), animator())),
            items: Arc::new(Selector::new(
                ItemsDomain::new(ItemRules::default()),
                random.clone(),
                animator(),
            )),
        };

        let randomize_all = use_cases::RandomizeAll::builder()
            .champion(selectors.champion.clone())
            .abilities(selectors.abilities.clone())
            .runes(selectors.runes.clone())
            .items(selectors.items.clone())
            .policy(settings.flight_policy)
            .build()?;

        let use_cases = UseCases {
            randomize_all: Arc::new(randomize_all),
            loadouts: use_cases::LoadoutUseCases::new(store, clock, random),
        };

        Ok(Self {
            settings,
            selectors,
            use_cases,
            catalog,
        })
    }

    /// System clock, thread RNG, tokio timers and an in-memory store.
    pub fn with_system_ports(
        settings: AppSettings,
        catalog: Arc<dyn CatalogPort>,
    ) -> Result<Self, OrchestratorError> {
        Self::new(
            settings,
            catalog,
            Arc::new(InMemoryLoadoutStore::new()),
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
            Arc::new(TokioTicker::new()),
        )
    }

    /// Fetch the catalog once and hand it to every selector.
    pub async fn load_catalog(&self) -> Result<(), CatalogError> {
        self.selectors.champion.mark_loading();
        self.selectors.abilities.mark_loading();
        self.selectors.runes.mark_loading();
        self.selectors.items.mark_loading();

        let converted = self
            .catalog
            .fetch_catalog()
            .await
            .and_then(|catalog| catalog.into_candidates().map_err(CatalogError::from));

        match converted {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                tracing::info!(
                    champions = catalog.champions.len(),
                    abilities = catalog.abilities.len(),
                    rune_trees = catalog.runes.trees().len(),
                    items = catalog.items.len(),
                    "Catalog loaded"
                );
                self.selectors.champion.load(catalog.clone());
                self.selectors.abilities.load(catalog.clone());
                self.selectors.runes.load(catalog.clone());
                self.selectors.items.load(catalog);
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                self.selectors.champion.mark_failed(reason.clone());
                self.selectors.abilities.mark_failed(reason.clone());
                self.selectors.runes.mark_failed(reason.clone());
                self.selectors.items.mark_failed(reason);
                Err(e)
            }
        }
    }

    /// Randomize everything for the configured role.
    pub async fn randomize_all(&self, mode: CycleMode) -> TriggerOutcome {
        self.use_cases
            .randomize_all
            .execute(self.settings.role, mode)
            .await
    }

    /// The committed results of every selector.
    pub fn current_loadout(&self) -> LoadoutRecord {
        LoadoutRecord {
            champion: self.selectors.champion.current(),
            abilities: self.selectors.abilities.current(),
            runes: self.selectors.runes.current(),
            items: self.selectors.items.current(),
        }
    }
}
