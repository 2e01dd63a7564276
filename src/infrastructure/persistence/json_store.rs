//! File-backed snapshot and alias stores.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::json_file::JsonFile;
use crate::domain::entities::Snapshot;
use crate::domain::registry::AliasMap;
use crate::domain::repositories::{AliasStore, SnapshotMap, SnapshotStore, StoreError};

/// Snapshot store persisted as a single JSON object keyed by domain.
///
/// ```json
/// {
///   "a.example": { "originalDomain": "a.example", "currentDomain": "b.example", ... }
/// }
/// ```
#[derive(Debug)]
pub struct JsonSnapshotStore {
    file: JsonFile,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Result<SnapshotMap, StoreError> {
        self.file.read().await
    }

    async fn save(&self, snapshots: &SnapshotMap) -> Result<(), StoreError> {
        // Sorted keys keep the file diff-friendly.
        let ordered: BTreeMap<&String, &Snapshot> = snapshots.iter().collect();
        self.file.write(&ordered).await?;
        tracing::debug!(path = %self.path().display(), count = snapshots.len(), "Snapshots saved");
        Ok(())
    }
}

/// Alias store persisted as a flat JSON object `original -> current`.
#[derive(Debug)]
pub struct JsonAliasStore {
    file: JsonFile,
}

impl JsonAliasStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl AliasStore for JsonAliasStore {
    async fn load(&self) -> Result<AliasMap, StoreError> {
        self.file.read().await
    }

    async fn save(&self, aliases: &AliasMap) -> Result<(), StoreError> {
        self.file.write(aliases).await?;
        tracing::debug!(path = %self.path().display(), count = aliases.len(), "Mappings saved");
        Ok(())
    }
}
