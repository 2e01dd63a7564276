//! Business logic services for the application layer.

pub mod monitor_service;
pub mod status_service;

pub use monitor_service::{CycleReport, CycleSummary, MonitorError, MonitorService};
pub use status_service::{DomainStatus, ReportedStatus, StatusService};
