//! In-process stores for ephemeral runs and tests.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::registry::AliasMap;
use crate::domain::repositories::{AliasStore, SnapshotMap, SnapshotStore, StoreError};

/// Snapshot store that keeps state in memory only.
///
/// State is lost when the process exits. Selected with `STORE_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<SnapshotMap>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `snapshots`.
    pub fn with_snapshots(snapshots: SnapshotMap) -> Self {
        Self {
            snapshots: RwLock::new(snapshots),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<SnapshotMap, StoreError> {
        self.snapshots
            .read()
            .map(|s| s.clone())
            .map_err(|_| StoreError::Unavailable("snapshot store lock poisoned".to_string()))
    }

    async fn save(&self, snapshots: &SnapshotMap) -> Result<(), StoreError> {
        let mut guard = self
            .snapshots
            .write()
            .map_err(|_| StoreError::Unavailable("snapshot store lock poisoned".to_string()))?;
        *guard = snapshots.clone();
        Ok(())
    }
}

/// Alias store that keeps state in memory only.
#[derive(Debug, Default)]
pub struct MemoryAliasStore {
    aliases: RwLock<AliasMap>,
}

impl MemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(aliases: AliasMap) -> Self {
        Self {
            aliases: RwLock::new(aliases),
        }
    }
}

#[async_trait]
impl AliasStore for MemoryAliasStore {
    async fn load(&self) -> Result<AliasMap, StoreError> {
        self.aliases
            .read()
            .map(|a| a.clone())
            .map_err(|_| StoreError::Unavailable("alias store lock poisoned".to_string()))
    }

    async fn save(&self, aliases: &AliasMap) -> Result<(), StoreError> {
        let mut guard = self
            .aliases
            .write()
            .map_err(|_| StoreError::Unavailable("alias store lock poisoned".to_string()))?;
        *guard = aliases.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Snapshot;

    #[tokio::test]
    async fn test_memory_snapshot_store_replaces_batch() {
        let store = MemorySnapshotStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let mut batch = SnapshotMap::new();
        batch.insert(
            "a.example".to_string(),
            Snapshot::reachable("a.example", "a.example", 200, None),
        );
        store.save(&batch).await.unwrap();

        let mut second = SnapshotMap::new();
        second.insert(
            "b.example".to_string(),
            Snapshot::unreachable("b.example", "timeout"),
        );
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("b.example"));
    }

    #[tokio::test]
    async fn test_memory_alias_store_round_trip() {
        let mut aliases = AliasMap::new();
        aliases.insert("a.example".to_string(), "b.example".to_string());

        let store = MemoryAliasStore::with_aliases(aliases.clone());
        assert_eq!(store.load().await.unwrap(), aliases);
    }
}
