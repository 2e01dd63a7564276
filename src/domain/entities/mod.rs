//! Core domain entities representing the monitoring data model.
//!
//! # Entity Types
//!
//! - [`Snapshot`] - Outcome of one probe of one domain
//! - [`HttpStatus`] - Terminal status code or the transport-failure sentinel
//! - [`ChangeEvent`] - A probe result classified against the previous snapshot
//! - [`RedirectDiscovery`] - A redirect observed while classifying
//!
//! Snapshots are created once per probe and never mutated afterwards; the
//! store keeps only the most recent one per domain.

pub mod change;
pub mod snapshot;

pub use change::{ChangeEvent, ChangeKind, RedirectDiscovery};
pub use snapshot::{HttpStatus, Snapshot};
