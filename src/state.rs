use std::sync::Arc;

use crate::application::services::{MonitorService, StatusService};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub status_service: Arc<StatusService>,
    pub monitor: Arc<MonitorService>,
}

impl AppState {
    pub fn new(status_service: Arc<StatusService>, monitor: Arc<MonitorService>) -> Self {
        Self {
            status_service,
            monitor,
        }
    }
}
