//! Change events produced by comparing consecutive snapshots.

use serde::Serialize;
use std::fmt;

use super::snapshot::Snapshot;

/// Classification of a probe result relative to the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// No snapshot existed for the domain.
    Initial,
    Unchanged,
    Changed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A redirect observed during a cycle.
///
/// `newly_added` is `true` only when the target was unknown and has been
/// appended to the monitored set as a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectDiscovery {
    pub from: String,
    pub to: String,
    pub newly_added: bool,
}

/// Result of classifying one probe against the previous state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub domain: String,
    pub kind: ChangeKind,
    pub previous: Option<Snapshot>,
    pub current: Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectDiscovery>,
}

impl ChangeEvent {
    /// Returns `true` if this event should be delivered to a notification sink.
    ///
    /// Every `changed` event is delivered, as is any event that grew the
    /// monitored set.
    pub fn is_notifiable(&self) -> bool {
        self.kind == ChangeKind::Changed
            || self.redirect.as_ref().is_some_and(|r| r.newly_added)
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let status = format!(
            "{} ({})",
            if self.current.is_live { "live" } else { "down" },
            self.current.http_status
        );

        let mut line = match &self.previous {
            Some(previous) if previous.is_live != self.current.is_live => format!(
                "{}: {} -> {}",
                self.domain,
                if previous.is_live { "live" } else { "down" },
                status
            ),
            Some(previous) if previous.http_status != self.current.http_status => format!(
                "{}: status {} -> {}",
                self.domain, previous.http_status, self.current.http_status
            ),
            _ => format!("{}: {} {}", self.domain, self.kind, status),
        };

        if let Some(redirect) = &self.redirect {
            line.push_str(&format!(", redirects to {}", redirect.to));
            if redirect.newly_added {
                line.push_str(" (now monitored)");
            }
        }

        line
    }
}
