//! Snapshot entity: the outcome of one probe of one domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Terminal HTTP status of a probe.
///
/// Serialized as the bare status code, or as the string `"error"` when the
/// transport attempt failed and no status was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatus {
    Code(u16),
    Error,
}

impl HttpStatus {
    /// Returns the numeric code, if a response was received.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Error => None,
        }
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Error => f.write_str("error"),
        }
    }
}

impl Serialize for HttpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Code(code) => serializer.serialize_u16(*code),
            Self::Error => serializer.serialize_str("error"),
        }
    }
}

impl<'de> Deserialize<'de> for HttpStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(Self::Code(code)),
            Raw::Text(text) if text == "error" => Ok(Self::Error),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected status code or \"error\", got {text:?}"
            ))),
        }
    }
}

/// Immutable record of a single probe.
///
/// `current_domain` equals `original_domain` unless the probe followed a
/// redirect to another host. Equality (`PartialEq`) compares every field,
/// `timestamp` included; use [`Snapshot::same_observation`] to compare what
/// was observed regardless of when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub original_domain: String,
    pub current_domain: String,
    pub http_status: HttpStatus,
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot for a domain that answered, possibly after redirects.
    pub fn reachable(
        original_domain: impl Into<String>,
        current_domain: impl Into<String>,
        status: u16,
        redirect_url: Option<String>,
    ) -> Self {
        Self {
            original_domain: original_domain.into(),
            current_domain: current_domain.into(),
            http_status: HttpStatus::Code(status),
            is_live: true,
            redirect_url,
            error_message: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a snapshot for a domain whose transport attempt failed.
    pub fn unreachable(domain: impl Into<String>, error_message: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            current_domain: domain.clone(),
            original_domain: domain,
            http_status: HttpStatus::Error,
            is_live: false,
            redirect_url: None,
            error_message: Some(error_message.into()),
            timestamp: Utc::now(),
        }
    }

    /// Overrides the capture time.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns `true` if the probe ended on a different host than it started.
    pub fn is_redirected(&self) -> bool {
        self.current_domain != self.original_domain
    }

    /// Compares two snapshots on every field except `timestamp`.
    pub fn same_observation(&self, other: &Snapshot) -> bool {
        self.original_domain == other.original_domain
            && self.current_domain == other.current_domain
            && self.http_status == other.http_status
            && self.is_live == other.is_live
            && self.redirect_url == other.redirect_url
            && self.error_message == other.error_message
    }
}
