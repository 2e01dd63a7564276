//! DTOs for health check endpoint.

use serde::Serialize;

use crate::application::services::CycleSummary;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub monitored_domains: usize,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub snapshot_store: CheckStatus,
    pub scheduler: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cycle: Option<CycleSummary>,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some(message.into()),
            last_cycle: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            last_cycle: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: "warning".to_string(),
            message: Some(message.into()),
            last_cycle: None,
        }
    }

    pub fn with_last_cycle(mut self, summary: CycleSummary) -> Self {
        self.last_cycle = Some(summary);
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
