//! Application layer: services and scheduling.
//!
//! This layer orchestrates domain operations by coordinating the prober,
//! the state stores, the registry and the notification sink.
//!
//! # Contents
//!
//! - [`services::MonitorService`] - Runs polling cycles
//! - [`services::StatusService`] - Status and mapping reports for the API
//! - [`scheduler`] - Fixed-delay and clock-aligned cycle scheduling

pub mod scheduler;
pub mod services;
