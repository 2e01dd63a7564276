//! Prober trait and outcome type.

use async_trait::async_trait;

use crate::domain::entities::Snapshot;

/// Result of probing one domain.
///
/// Both variants carry a complete [`Snapshot`]; callers never need error
/// handling to interpret a failed probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The domain answered with some HTTP status, possibly after redirects.
    Reachable(Snapshot),
    /// The transport attempt failed (DNS, connect, TLS, timeout, redirect limit).
    Unreachable(Snapshot),
}

impl ProbeOutcome {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            Self::Reachable(snapshot) | Self::Unreachable(snapshot) => snapshot,
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        match self {
            Self::Reachable(snapshot) | Self::Unreachable(snapshot) => snapshot,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reachable(_) => "reachable",
            Self::Unreachable(_) => "unreachable",
        }
    }
}

/// Issues a single availability probe for a domain.
///
/// Implementations must bound the time spent per call and must not fail:
/// transport errors are reported as [`ProbeOutcome::Unreachable`].
///
/// # Implementations
///
/// - [`crate::infrastructure::probe::HttpProber`] - reqwest-based HTTP(S) probe
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, domain: &str) -> ProbeOutcome;
}
