//! Read-side service backing the status and mappings endpoints.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{HttpStatus, Snapshot};
use crate::domain::registry::{AliasMap, DomainRegistry};
use crate::domain::repositories::SnapshotStore;
use crate::error::AppError;
use crate::utils::hostname::normalize_hostname;

/// Status reported for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportedStatus {
    Http(HttpStatus),
    /// No snapshot exists yet.
    Unknown,
}

/// Current state of one monitored domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStatus {
    pub domain: String,
    pub is_live: bool,
    pub status: ReportedStatus,
    pub current_domain: String,
    /// `None` until the domain has been probed once.
    pub last_checked: Option<DateTime<Utc>>,
}

impl DomainStatus {
    fn from_snapshot(domain: &str, snapshot: Option<&Snapshot>) -> Self {
        match snapshot {
            Some(snapshot) => Self {
                domain: domain.to_string(),
                is_live: snapshot.is_live,
                status: ReportedStatus::Http(snapshot.http_status),
                current_domain: snapshot.current_domain.clone(),
                last_checked: Some(snapshot.timestamp),
            },
            None => Self {
                domain: domain.to_string(),
                is_live: false,
                status: ReportedStatus::Unknown,
                current_domain: domain.to_string(),
                last_checked: None,
            },
        }
    }
}

/// Combines the monitored set with stored snapshots for reporting.
pub struct StatusService {
    registry: Arc<RwLock<DomainRegistry>>,
    snapshots: Arc<dyn SnapshotStore>,
}

impl StatusService {
    pub fn new(registry: Arc<RwLock<DomainRegistry>>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            registry,
            snapshots,
        }
    }

    /// Status of every monitored domain, in monitored-set order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the snapshot store cannot be read.
    pub async fn report(&self) -> Result<Vec<DomainStatus>, AppError> {
        let domains = self.registry.read().await.domains().to_vec();
        let snapshots = self.snapshots.load().await?;

        Ok(domains
            .iter()
            .map(|domain| DomainStatus::from_snapshot(domain, snapshots.get(domain)))
            .collect())
    }

    /// Status of a single monitored domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `domain` is not a valid hostname.
    /// Returns [`AppError::NotFound`] if the domain is not monitored.
    /// Returns [`AppError::Internal`] if the snapshot store cannot be read.
    pub async fn domain_status(&self, domain: &str) -> Result<DomainStatus, AppError> {
        let domain = normalize_hostname(domain).map_err(|e| {
            AppError::bad_request("Invalid domain name", json!({ "reason": e.to_string() }))
        })?;

        if !self.registry.read().await.contains(&domain) {
            return Err(AppError::not_found(
                "Domain is not monitored",
                json!({ "domain": domain }),
            ));
        }

        let snapshots = self.snapshots.load().await?;
        Ok(DomainStatus::from_snapshot(&domain, snapshots.get(&domain)))
    }

    /// Every redirect mapping discovered so far.
    pub async fn mappings(&self) -> AliasMap {
        self.registry.read().await.aliases().clone()
    }

    /// Checks that the snapshot store can be read.
    ///
    /// # Errors
    ///
    /// Returns the store error message on failure.
    pub async fn check_store(&self) -> Result<usize, String> {
        self.snapshots
            .load()
            .await
            .map(|snapshots| snapshots.len())
            .map_err(|e| e.to_string())
    }

    pub async fn monitored_count(&self) -> usize {
        self.registry.read().await.len()
    }
}
