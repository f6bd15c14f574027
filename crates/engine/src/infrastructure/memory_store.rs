//! In-memory loadout store.

use async_trait::async_trait;
use dashmap::DashMap;
use riftroll_domain::LoadoutId;

use crate::infrastructure::ports::{LoadoutStore, SavedLoadout, StoreError};

/// Loadouts held for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryLoadoutStore {
    loadouts: DashMap<LoadoutId, SavedLoadout>,
}

impl InMemoryLoadoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.loadouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loadouts.is_empty()
    }
}

#[async_trait]
impl LoadoutStore for InMemoryLoadoutStore {
    async fn save(&self, loadout: SavedLoadout) -> Result<(), StoreError> {
        self.loadouts.insert(loadout.id, loadout);
        Ok(())
    }

    async fn get(&self, id: LoadoutId) -> Result<Option<SavedLoadout>, StoreError> {
        Ok(self.loadouts.get(&id).map(|entry| entry.value().clone()))
    }

    /// Newest first.
    async fn list(&self) -> Result<Vec<SavedLoadout>, StoreError> {
        let mut loadouts: Vec<SavedLoadout> = self
            .loadouts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        loadouts.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(loadouts)
    }
}
