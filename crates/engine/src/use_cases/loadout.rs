//! Loadout persistence use cases.

use std::sync::Arc;

use riftroll_domain::{LoadoutId, LoadoutRecord};

use crate::infrastructure::ports::{ClockPort, LoadoutStore, RandomPort, SavedLoadout, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum LoadoutError {
    #[error("Loadout not found: {0}")]
    NotFound(LoadoutId),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Container for loadout use cases.
pub struct LoadoutUseCases {
    pub save: Arc<SaveLoadout>,
    pub get: Arc<GetLoadout>,
    pub list: Arc<ListLoadouts>,
}

impl LoadoutUseCases {
    pub fn new(
        store: Arc<dyn LoadoutStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            save: Arc::new(SaveLoadout::new(store.clone(), clock, random)),
            get: Arc::new(GetLoadout::new(store.clone())),
            list: Arc::new(ListLoadouts::new(store)),
        }
    }
}

/// Persist a loadout under a fresh id.
pub struct SaveLoadout {
    store: Arc<dyn LoadoutStore>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SaveLoadout {
    pub fn new(
        store: Arc<dyn LoadoutStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            store,
            clock,
            random,
        }
    }

    pub async fn execute(&self, record: LoadoutRecord) -> Result<SavedLoadout, LoadoutError> {
        let saved = SavedLoadout {
            id: LoadoutId::from_uuid(self.random.gen_uuid()),
            record,
            saved_at: self.clock.now(),
        };
        self.store.save(saved.clone()).await?;
        tracing::info!(loadout_id = %saved.id, "Loadout saved");
        Ok(saved)
    }
}

pub struct GetLoadout {
    store: Arc<dyn LoadoutStore>,
}

impl GetLoadout {
    pub fn new(store: Arc<dyn LoadoutStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, id: LoadoutId) -> Result<SavedLoadout, LoadoutError> {
        self.store
            .get(id)
            .await?
            .ok_or(LoadoutError::NotFound(id))
    }
}

/// Every saved loadout, newest first.
pub struct ListLoadouts {
    store: Arc<dyn LoadoutStore>,
}

impl ListLoadouts {
    pub fn new(store: Arc<dyn LoadoutStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<SavedLoadout>, LoadoutError> {
        Ok(self.store.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::memory_store::InMemoryLoadoutStore;
    use crate::infrastructure::ports::{MockClockPort, MockLoadoutStore};
    use chrono::{Duration, TimeZone, Utc};
    use mockall::predicate::*;
    use riftroll_domain::{Candidate, ChampionPick};
    use uuid::Uuid;

    fn record() -> LoadoutRecord {
        LoadoutRecord {
            champion: ChampionPick::new(Some(Candidate::new("Ahri", "Ahri"))),
            ..LoadoutRecord::default()
        }
    }

    #[tokio::test]
    async fn saved_record_is_returned_unchanged() {
        let store: Arc<dyn LoadoutStore> = Arc::new(InMemoryLoadoutStore::new());
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap();
        let use_cases = LoadoutUseCases::new(
            store,
            Arc::new(FixedClock(now)),
            Arc::new(FixedRandom::constant(0)),
        );

        let saved = use_cases.save.execute(record()).await.unwrap();
        assert_eq!(saved.saved_at, now);
        assert_eq!(saved.id, LoadoutId::from_uuid(Uuid::from_u128(1)));

        let fetched = use_cases.get.execute(saved.id).await.unwrap();
        assert_eq!(fetched, saved);
        assert_eq!(fetched.record, record());
    }

    #[tokio::test]
    async fn missing_loadout_is_not_found() {
        let mut store = MockLoadoutStore::new();
        let id = LoadoutId::new();
        store.expect_get().with(eq(id)).returning(|_| Ok(None));

        let err = GetLoadout::new(Arc::new(store)).execute(id).await.unwrap_err();
        assert!(matches!(err, LoadoutError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let mut store = MockLoadoutStore::new();
        store
            .expect_save()
            .returning(|_| Err(StoreError::backend("save", "disk full")));
        let mut clock = MockClockPort::new();
        clock.expect_now().returning(Utc::now);

        let err = SaveLoadout::new(
            Arc::new(store),
            Arc::new(clock),
            Arc::new(FixedRandom::constant(0)),
        )
        .execute(record())
        .await
        .unwrap_err();
        assert!(matches!(err, LoadoutError::Store(StoreError::Backend { .. })));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store: Arc<dyn LoadoutStore> = Arc::new(InMemoryLoadoutStore::new());
        let start = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap();
        let random: Arc<dyn RandomPort> = Arc::new(FixedRandom::constant(0));

        let older = SaveLoadout::new(store.clone(), Arc::new(FixedClock(start)), random.clone())
            .execute(record())
            .await
            .unwrap();
        let newer = SaveLoadout::new(
            store.clone(),
            Arc::new(FixedClock(start + Duration::seconds(5))),
            random,
        )
        .execute(LoadoutRecord::default())
        .await
        .unwrap();

        let listed = ListLoadouts::new(store).execute().await.unwrap();
        assert_eq!(listed, vec![newer, older]);
    }
}
