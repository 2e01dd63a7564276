//! Domain layer: the probe/diff/registry engine.
//!
//! Nothing in this module performs I/O. Probing, persistence and notification
//! live in [`crate::infrastructure`]; the cycle that ties them together is in
//! [`crate::application::services::MonitorService`].
//!
//! # Architecture
//!
//! - [`entities`] - Snapshot and change event data model
//! - [`diff`] - Classification of a new snapshot against the stored one
//! - [`registry`] - Monitored domain set and alias mapping
//! - [`repositories`] - State store trait definitions
//!
//! # Cycle Flow
//!
//! 1. [`registry::DomainRegistry`] supplies the domains to probe
//! 2. Each probe result is passed to [`diff::classify`] with the stored snapshot
//! 3. A redirect to an unknown host grows the registry via [`registry::DomainRegistry::add`]
//! 4. The batch of new snapshots is saved through [`repositories::SnapshotStore`]

pub mod diff;
pub mod entities;
pub mod registry;
pub mod repositories;
