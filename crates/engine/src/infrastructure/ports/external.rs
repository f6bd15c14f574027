//! Catalog and loadout storage ports.

use async_trait::async_trait;
use riftroll_domain::{Catalog, LoadoutId};

use super::error::{CatalogError, StoreError};
use super::types::SavedLoadout;

/// Source of raw catalog data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadoutStore: Send + Sync {
    async fn save(&self, loadout: SavedLoadout) -> Result<(), StoreError>;
    async fn get(&self, id: LoadoutId) -> Result<Option<SavedLoadout>, StoreError>;
    async fn list(&self) -> Result<Vec<SavedLoadout>, StoreError>;
}
