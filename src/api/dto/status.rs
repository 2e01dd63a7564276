//! DTOs for the status endpoints.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::application::services::{DomainStatus, ReportedStatus};
use crate::domain::entities::HttpStatus;

/// Reported status: the HTTP code, `"error"` or `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusValue {
    Code(u16),
    Label(&'static str),
}

impl From<ReportedStatus> for StatusValue {
    fn from(status: ReportedStatus) -> Self {
        match status {
            ReportedStatus::Http(HttpStatus::Code(code)) => Self::Code(code),
            ReportedStatus::Http(HttpStatus::Error) => Self::Label("error"),
            ReportedStatus::Unknown => Self::Label("unknown"),
        }
    }
}

/// Timestamp of the last probe, or `"never"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LastChecked {
    At(DateTime<Utc>),
    Never(&'static str),
}

impl From<Option<DateTime<Utc>>> for LastChecked {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Never("never"), Self::At)
    }
}

/// Status entry for one domain.
///
/// ```json
/// {
///   "isLive": true,
///   "status": 200,
///   "currentDomain": "new.example.com",
///   "lastChecked": "2024-01-15T10:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainStatusDto {
    pub is_live: bool,
    pub status: StatusValue,
    pub current_domain: String,
    pub last_checked: LastChecked,
}

impl From<DomainStatus> for DomainStatusDto {
    fn from(status: DomainStatus) -> Self {
        Self {
            is_live: status.is_live,
            status: status.status.into(),
            current_domain: status.current_domain,
            last_checked: status.last_checked.into(),
        }
    }
}

/// Response for `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(serialize_with = "ordered_map")]
    pub domains: Vec<(String, DomainStatusDto)>,
}

impl From<Vec<DomainStatus>> for StatusResponse {
    fn from(report: Vec<DomainStatus>) -> Self {
        Self {
            domains: report
                .into_iter()
                .map(|status| (status.domain.clone(), status.into()))
                .collect(),
        }
    }
}

/// Serializes pairs as a JSON object, keeping monitored-set order.
fn ordered_map<S>(entries: &[(String, DomainStatusDto)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
}
