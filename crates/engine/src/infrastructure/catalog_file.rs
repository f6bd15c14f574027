//! Catalog adapters: a JSON file on disk and an in-memory catalog.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use riftroll_domain::Catalog;

use crate::infrastructure::ports::{CatalogError, CatalogPort};

/// Reads the catalog from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogPort for JsonFileCatalog {
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::io(format!("{}: {}", self.path.display(), e)))?;
        let catalog: Catalog = serde_json::from_str(&raw)
            .map_err(|e| CatalogError::parse(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(
            path = %self.path.display(),
            champions = catalog.champions.len(),
            abilities = catalog.abilities.len(),
            rune_trees = catalog.rune_trees.len(),
            items = catalog.items.len(),
            "Catalog file read"
        );
        Ok(catalog)
    }
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogPort for StaticCatalog {
    async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_catalog;
    use std::io::Write;

    #[tokio::test]
    async fn reads_catalog_written_to_disk() {
        let catalog = sample_catalog();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&catalog).unwrap().as_bytes())
            .unwrap();

        let port = JsonFileCatalog::new(file.path());
        let fetched = port.fetch_catalog().await.unwrap();
        assert_eq!(fetched, catalog);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let port = JsonFileCatalog::new(dir.path().join("absent.json"));
        let err = port.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"champions\": [ { \"name\": ").unwrap();

        let err = JsonFileCatalog::new(file.path())
            .fetch_catalog()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn static_catalog_returns_its_copy() {
        let port = StaticCatalog::new(sample_catalog());
        assert_eq!(port.fetch_catalog().await.unwrap(), sample_catalog());
    }
}
