#![allow(dead_code)]

use async_trait::async_trait;
use domain_watch::application::services::{MonitorService, StatusService};
use domain_watch::domain::entities::{ChangeEvent, Snapshot};
use domain_watch::domain::registry::{AliasMap, DomainRegistry};
use domain_watch::domain::repositories::{AliasStore, SnapshotMap, SnapshotStore, StoreError};
use domain_watch::infrastructure::notify::{NotificationSink, NotifyError};
use domain_watch::infrastructure::persistence::{MemoryAliasStore, MemorySnapshotStore};
use domain_watch::infrastructure::probe::{ProbeOutcome, Prober};
use domain_watch::state::AppState;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

/// Prober that answers from per-domain scripts.
///
/// Each call pops the next outcome for the domain; the last outcome repeats.
/// Unscripted domains are reported unreachable.
#[derive(Default)]
pub struct ScriptedProber {
    scripts: Mutex<HashMap<String, VecDeque<ProbeOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, domain: &str, outcomes: Vec<ProbeOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(domain.to_string(), outcomes.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, domain: &str) -> ProbeOutcome {
        self.calls.lock().unwrap().push(domain.to_string());

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(domain) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => ProbeOutcome::Unreachable(Snapshot::unreachable(domain, "not scripted")),
        }
    }
}

pub fn live(domain: &str, current: &str, status: u16) -> ProbeOutcome {
    let redirect_url = (current != domain).then(|| format!("https://{current}/"));
    ProbeOutcome::Reachable(Snapshot::reachable(domain, current, status, redirect_url))
}

pub fn down(domain: &str) -> ProbeOutcome {
    ProbeOutcome::Unreachable(Snapshot::unreachable(domain, "connection failed: refused"))
}

/// Sink that records every delivered event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, event: &ChangeEvent) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Snapshot store whose reads always fail.
pub struct BrokenSnapshotStore;

#[async_trait]
impl SnapshotStore for BrokenSnapshotStore {
    async fn load(&self) -> Result<SnapshotMap, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn save(&self, _snapshots: &SnapshotMap) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }
}

/// Alias store that rejects its first `failures` saves.
pub struct FlakyAliasStore {
    failures: Mutex<usize>,
    inner: MemoryAliasStore,
}

impl FlakyAliasStore {
    pub fn new(failures: usize) -> Self {
        Self {
            failures: Mutex::new(failures),
            inner: MemoryAliasStore::new(),
        }
    }
}

#[async_trait]
impl AliasStore for FlakyAliasStore {
    async fn load(&self) -> Result<AliasMap, StoreError> {
        self.inner.load().await
    }

    async fn save(&self, aliases: &AliasMap) -> Result<(), StoreError> {
        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(StoreError::Unavailable("disk full".to_string()));
            }
        }
        self.inner.save(aliases).await
    }
}

pub struct TestHarness {
    pub monitor: Arc<MonitorService>,
    pub status: Arc<StatusService>,
    pub prober: Arc<ScriptedProber>,
    pub sink: Arc<RecordingSink>,
    pub snapshots: Arc<MemorySnapshotStore>,
    pub aliases: Arc<MemoryAliasStore>,
}

impl TestHarness {
    pub fn state(&self) -> AppState {
        AppState::new(self.status.clone(), self.monitor.clone())
    }
}

pub fn create_harness(seed: &[&str], prober: ScriptedProber) -> TestHarness {
    create_harness_with(
        seed,
        prober,
        MemorySnapshotStore::new(),
        MemoryAliasStore::new(),
    )
}

pub fn create_harness_with(
    seed: &[&str],
    prober: ScriptedProber,
    snapshots: MemorySnapshotStore,
    aliases: MemoryAliasStore,
) -> TestHarness {
    let registry = Arc::new(RwLock::new(DomainRegistry::new(seed.iter().copied())));
    let prober = Arc::new(prober);
    let sink = Arc::new(RecordingSink::default());
    let snapshots = Arc::new(snapshots);
    let aliases = Arc::new(aliases);

    let monitor = Arc::new(MonitorService::new(
        registry.clone(),
        prober.clone(),
        snapshots.clone(),
        aliases.clone(),
        sink.clone(),
    ));
    let status = Arc::new(StatusService::new(registry, snapshots.clone()));

    TestHarness {
        monitor,
        status,
        prober,
        sink,
        snapshots,
        aliases,
    }
}

/// App state whose snapshot store cannot be read.
pub fn create_broken_state(seed: &[&str]) -> AppState {
    let registry = Arc::new(RwLock::new(DomainRegistry::new(seed.iter().copied())));
    let snapshots: Arc<dyn SnapshotStore> = Arc::new(BrokenSnapshotStore);

    let monitor = Arc::new(MonitorService::new(
        registry.clone(),
        Arc::new(ScriptedProber::new()),
        snapshots.clone(),
        Arc::new(MemoryAliasStore::new()),
        Arc::new(RecordingSink::default()),
    ));

    AppState::new(Arc::new(StatusService::new(registry, snapshots)), monitor)
}
