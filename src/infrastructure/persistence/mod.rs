//! State store implementations.
//!
//! Concrete implementations of the domain repository traits.
//!
//! # Stores
//!
//! - [`JsonSnapshotStore`] / [`JsonAliasStore`] - JSON files replaced atomically
//! - [`MemorySnapshotStore`] / [`MemoryAliasStore`] - In-process state

mod json_file;
pub mod json_store;
pub mod memory_store;

pub use json_store::{JsonAliasStore, JsonSnapshotStore};
pub use memory_store::{MemoryAliasStore, MemorySnapshotStore};
