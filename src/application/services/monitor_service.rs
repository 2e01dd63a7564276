//! Polling cycle orchestration.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

use crate::domain::diff::{classify, redirect_target};
use crate::domain::entities::{ChangeEvent, ChangeKind, RedirectDiscovery};
use crate::domain::registry::DomainRegistry;
use crate::domain::repositories::{AliasStore, SnapshotMap, SnapshotStore, StoreError};
use crate::infrastructure::notify::NotificationSink;
use crate::infrastructure::probe::Prober;
use crate::utils::hostname::normalize_hostname;

/// Errors surfaced by a polling cycle.
///
/// Probe failures never appear here; they are recorded as snapshots.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The cycle ran to completion but its state could not be saved.
    #[error("Failed to persist cycle state: {source}")]
    Persist {
        #[source]
        source: StoreError,
        report: Box<CycleReport>,
    },
}

/// Everything a single cycle observed.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub probed: usize,
    pub unchanged: usize,
    /// Events whose kind is not `unchanged`, in monitored-set order.
    pub events: Vec<ChangeEvent>,
    /// Domains appended to the monitored set during this cycle.
    pub discovered: Vec<String>,
}

impl CycleReport {
    pub fn changed(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == ChangeKind::Changed)
            .count()
    }
}

/// Condensed outcome of the most recent cycle, kept for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub finished_at: DateTime<Utc>,
    pub probed: usize,
    pub changed: usize,
    pub discovered: usize,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs polling cycles over the monitored set.
///
/// Per domain: probe, classify against the stored snapshot, grow the
/// registry on redirect discovery, notify. The snapshot batch is written
/// once at the end of the cycle. Cycles are serialized; the registry is only
/// written from inside a cycle.
pub struct MonitorService {
    registry: Arc<RwLock<DomainRegistry>>,
    prober: Arc<dyn Prober>,
    snapshots: Arc<dyn SnapshotStore>,
    aliases: Arc<dyn AliasStore>,
    notifier: Arc<dyn NotificationSink>,
    concurrency: usize,
    cycle_lock: Mutex<()>,
    /// Set while the in-memory alias map has changes the store has not accepted.
    mappings_dirty: AtomicBool,
    last_cycle: RwLock<Option<CycleSummary>>,
}

impl MonitorService {
    /// Creates a monitor that probes sequentially.
    pub fn new(
        registry: Arc<RwLock<DomainRegistry>>,
        prober: Arc<dyn Prober>,
        snapshots: Arc<dyn SnapshotStore>,
        aliases: Arc<dyn AliasStore>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            registry,
            prober,
            snapshots,
            aliases,
            notifier,
            concurrency: 1,
            cycle_lock: Mutex::new(()),
            mappings_dirty: AtomicBool::new(false),
            last_cycle: RwLock::new(None),
        }
    }

    /// Sets how many probes may be in flight at once (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn registry(&self) -> Arc<RwLock<DomainRegistry>> {
        self.registry.clone()
    }

    pub async fn last_cycle(&self) -> Option<CycleSummary> {
        self.last_cycle.read().await.clone()
    }

    /// Replays persisted aliases into the registry.
    ///
    /// Unreadable alias state is logged and treated as empty. Returns the
    /// number of domains appended.
    pub async fn restore(&self) -> usize {
        let aliases = match self.aliases.load().await {
            Ok(aliases) => aliases,
            Err(e) => {
                warn!(error = %e, "Could not load mappings, starting from seed list");
                return 0;
            }
        };

        let mut registry = self.registry.write().await;
        let appended = registry.restore(&aliases);
        metrics::gauge!("monitored_domains").set(registry.len() as f64);
        info!(
            appended,
            monitored = registry.len(),
            "Restored mappings from previous runs"
        );
        appended
    }

    /// Runs one polling cycle over the monitored set as it was at cycle start.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Persist`] if the snapshot batch or the alias
    /// mapping could not be written. The registry keeps any domains added
    /// during the cycle.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> Result<CycleReport, MonitorError> {
        let _guard = self.cycle_lock.lock().await;
        let started_at = Utc::now();

        let domains = self.registry.read().await.domains().to_vec();
        let mut stored = match self.snapshots.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Could not load previous snapshots, treating as empty");
                SnapshotMap::new()
            }
        };

        debug!(count = domains.len(), "Probing monitored domains");
        let outcomes: Vec<_> = stream::iter(domains.clone())
            .map(|domain| {
                let prober = self.prober.clone();
                async move { prober.probe(&domain).await }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut batch = SnapshotMap::with_capacity(domains.len());
        let mut events = Vec::new();
        let mut discovered = Vec::new();
        let mut unchanged = 0;

        for (domain, outcome) in domains.iter().zip(outcomes) {
            metrics::counter!("probes_total", "outcome" => outcome.label()).increment(1);

            let mut event = classify(stored.get(domain), outcome.into_snapshot());
            event.domain = domain.clone();

            if let Some(discovery) = self.discover(domain, &event).await {
                if discovery.newly_added {
                    discovered.push(discovery.to.clone());
                }
                event.redirect = Some(discovery);
            }

            metrics::counter!("change_events_total", "kind" => event.kind.as_str()).increment(1);

            if event.is_notifiable() {
                self.dispatch(&event).await;
            } else if event.kind == ChangeKind::Initial {
                debug!(domain = %domain, "{}", event.summary());
            }

            batch.insert(domain.clone(), event.current.clone());
            if event.kind == ChangeKind::Unchanged {
                unchanged += 1;
            } else {
                events.push(event);
            }
        }

        stored.extend(batch);
        let mut persist_error = self.snapshots.save(&stored).await.err();
        if let Some(e) = &persist_error {
            error!(error = %e, "Failed to save snapshots");
        }

        // A failed save is retried on later cycles even when they discover nothing.
        if !discovered.is_empty() || self.mappings_dirty.load(Ordering::Acquire) {
            let aliases = self.registry.read().await.aliases().clone();
            match self.aliases.save(&aliases).await {
                Ok(()) => self.mappings_dirty.store(false, Ordering::Release),
                Err(e) => {
                    error!(error = %e, "Failed to save mappings");
                    self.mappings_dirty.store(true, Ordering::Release);
                    persist_error.get_or_insert(e);
                }
            }
        }

        let monitored = self.registry.read().await.len();
        metrics::gauge!("monitored_domains").set(monitored as f64);

        let report = CycleReport {
            started_at,
            finished_at: Utc::now(),
            probed: domains.len(),
            unchanged,
            events,
            discovered,
        };

        info!(
            probed = report.probed,
            changed = report.changed(),
            discovered = report.discovered.len(),
            monitored,
            "Cycle finished"
        );

        *self.last_cycle.write().await = Some(CycleSummary {
            finished_at: report.finished_at,
            probed: report.probed,
            changed: report.changed(),
            discovered: report.discovered.len(),
            succeeded: persist_error.is_none(),
            error: persist_error.as_ref().map(ToString::to_string),
        });

        match persist_error {
            Some(source) => Err(MonitorError::Persist {
                source,
                report: Box::new(report),
            }),
            None => Ok(report),
        }
    }

    /// Grows the registry when the event shows a redirect to another host.
    async fn discover(&self, domain: &str, event: &ChangeEvent) -> Option<RedirectDiscovery> {
        let target = redirect_target(event)?;
        let target = match normalize_hostname(target) {
            Ok(target) => target,
            Err(e) => {
                warn!(domain, redirect_to = target, error = %e, "Ignoring redirect to invalid host");
                return None;
            }
        };

        let newly_added = self.registry.write().await.add(&target, domain);
        if newly_added {
            metrics::counter!("domains_discovered_total").increment(1);
            info!(from = domain, to = %target, "Discovered redirect target, now monitoring it");
        }

        Some(RedirectDiscovery {
            from: domain.to_string(),
            to: target,
            newly_added,
        })
    }

    async fn dispatch(&self, event: &ChangeEvent) {
        if let Err(e) = self.notifier.notify(event).await {
            warn!(
                sink = self.notifier.name(),
                domain = %event.domain,
                error = %e,
                "Notification delivery failed"
            );
        }
    }
}
