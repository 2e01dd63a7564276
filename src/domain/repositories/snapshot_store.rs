//! Repository trait for the latest snapshot per domain.

use std::collections::HashMap;

use async_trait::async_trait;

use super::StoreError;
use crate::domain::entities::Snapshot;

/// Latest snapshot per domain, keyed by the monitored domain name.
pub type SnapshotMap = HashMap<String, Snapshot>;

/// Persistence interface for snapshots.
///
/// The whole mapping is read and written at once; a cycle never exposes a
/// partially updated mapping to readers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonSnapshotStore`] - JSON file with atomic replace
/// - [`crate::infrastructure::persistence::MemorySnapshotStore`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the stored mapping.
    ///
    /// A store that has never been written returns an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if existing state cannot be read or decoded.
    async fn load(&self) -> Result<SnapshotMap, StoreError>;

    /// Replaces the stored mapping with `snapshots`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; previously stored state is
    /// left intact in that case.
    async fn save(&self, snapshots: &SnapshotMap) -> Result<(), StoreError>;
}
