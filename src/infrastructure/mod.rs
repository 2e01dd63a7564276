//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and talks to
//! the outside world.
//!
//! # Modules
//!
//! - [`notify`] - Notification sinks (log, webhook, no-op)
//! - [`persistence`] - Snapshot and alias stores (JSON files, in-memory)
//! - [`probe`] - HTTP availability probing

pub mod notify;
pub mod persistence;
pub mod probe;
