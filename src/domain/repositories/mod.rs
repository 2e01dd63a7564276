//! Repository trait definitions for the domain layer.
//!
//! These traits abstract where monitoring state lives. Concrete stores are
//! implemented in `crate::infrastructure::persistence`; mock implementations
//! are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`SnapshotStore`] - Latest snapshot per domain
//! - [`AliasStore`] - Original domain to redirect target mapping

pub mod alias_store;
pub mod snapshot_store;

pub use alias_store::AliasStore;
pub use snapshot_store::{SnapshotMap, SnapshotStore};

#[cfg(test)]
pub use alias_store::MockAliasStore;
#[cfg(test)]
pub use snapshot_store::MockSnapshotStore;

use std::path::PathBuf;

/// Errors raised by state stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt state in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
