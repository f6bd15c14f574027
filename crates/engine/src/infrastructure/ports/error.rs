//! Error types for port operations.

use riftroll_domain::DomainError;

/// Catalog provider failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Catalog could not be read.
    #[error("Catalog I/O error: {0}")]
    Io(String),

    /// Catalog was read but is not valid catalog JSON.
    #[error("Catalog parse error: {0}")]
    Parse(String),

    /// Catalog parsed but an entry could not become a candidate.
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

impl CatalogError {
    pub fn io(message: impl ToString) -> Self {
        Self::Io(message.to_string())
    }

    pub fn parse(message: impl ToString) -> Self {
        Self::Parse(message.to_string())
    }

    pub fn invalid(message: impl ToString) -> Self {
        Self::Invalid(message.to_string())
    }
}

impl From<DomainError> for CatalogError {
    fn from(value: DomainError) -> Self {
        Self::invalid(value)
    }
}

/// Loadout storage errors with context for debugging.
///
/// A missing loadout is not a store error: `LoadoutStore::get` answers `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage backend failed - includes operation name for tracing.
    #[error("Store error in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_names_the_operation() {
        let err = StoreError::backend("save", "disk full");
        assert_eq!(err.to_string(), "Store error in save: disk full");
    }

    #[test]
    fn domain_errors_become_invalid_catalog() {
        let err = CatalogError::from(DomainError::validation("empty id"));
        assert!(matches!(err, CatalogError::Invalid(_)));
    }
}
