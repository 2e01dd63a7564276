//! Repository trait for the original-to-current domain mapping.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::registry::AliasMap;

/// Persistence interface for the alias mapping.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonAliasStore`] - JSON file with atomic replace
/// - [`crate::infrastructure::persistence::MemoryAliasStore`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Loads the stored mapping; empty if nothing was written yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if existing state cannot be read or decoded.
    async fn load(&self) -> Result<AliasMap, StoreError>;

    /// Replaces the stored mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    async fn save(&self, aliases: &AliasMap) -> Result<(), StoreError>;
}
