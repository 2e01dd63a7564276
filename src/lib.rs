//! # Domain Watch
//!
//! Periodically probes a set of domains over HTTP, records a snapshot of
//! each observation, reports status changes and follows redirects to new
//! domains, which are then monitored too.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Snapshots, change classification, the monitored set and store traits
//! - **Application Layer** ([`application`]) - Polling cycles, status reporting and scheduling
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP prober, JSON/in-memory stores, notification sinks
//! - **API Layer** ([`api`]) - Read-only REST API handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Redirect discovery: a domain that redirects elsewhere adds its target to the monitored set
//! - Change events for liveness, status code and redirect target changes
//! - Log, webhook or disabled notifications
//! - Fixed-delay or clock-aligned scheduling with graceful shutdown
//! - Atomic JSON state files
//!
//! ## Quick Start
//!
//! ```bash
//! export SEED_DOMAINS="example.com,example.org"
//!
//! cargo run
//! curl http://localhost:3000/api/status
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CycleReport, MonitorService, StatusService};
    pub use crate::domain::entities::{ChangeEvent, ChangeKind, HttpStatus, Snapshot};
    pub use crate::domain::registry::{AliasMap, DomainRegistry};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
