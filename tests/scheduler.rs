mod common;

use async_trait::async_trait;
use common::{RecordingSink, ScriptedProber, live};
use domain_watch::application::scheduler::{Schedule, run_scheduler};
use domain_watch::application::services::MonitorService;
use domain_watch::domain::registry::DomainRegistry;
use domain_watch::domain::repositories::{SnapshotMap, SnapshotStore, StoreError};
use domain_watch::infrastructure::persistence::{MemoryAliasStore, MemorySnapshotStore};
use domain_watch::infrastructure::probe::{ProbeOutcome, Prober};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Prober that takes a while to answer.
struct SlowProber {
    delay: Duration,
    inner: ScriptedProber,
}

#[async_trait]
impl Prober for SlowProber {
    async fn probe(&self, domain: &str) -> ProbeOutcome {
        tokio::time::sleep(self.delay).await;
        self.inner.probe(domain).await
    }
}

/// Snapshot store that fails the saves whose ordinal is listed in `failing`
/// and records when each save was attempted.
struct TimedSnapshotStore {
    failing: Vec<usize>,
    attempts: Mutex<Vec<Instant>>,
    inner: MemorySnapshotStore,
}

impl TimedSnapshotStore {
    fn new(failing: Vec<usize>) -> Self {
        Self {
            failing,
            attempts: Mutex::new(Vec::new()),
            inner: MemorySnapshotStore::new(),
        }
    }

    fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotStore for TimedSnapshotStore {
    async fn load(&self) -> Result<SnapshotMap, StoreError> {
        self.inner.load().await
    }

    async fn save(&self, snapshots: &SnapshotMap) -> Result<(), StoreError> {
        let ordinal = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(Instant::now());
            attempts.len()
        };
        if self.failing.contains(&ordinal) {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.inner.save(snapshots).await
    }
}

fn monitor(prober: impl Prober + 'static, snapshots: Arc<dyn SnapshotStore>) -> Arc<MonitorService> {
    Arc::new(MonitorService::new(
        Arc::new(RwLock::new(DomainRegistry::new(["a.example"]))),
        Arc::new(prober),
        snapshots,
        Arc::new(MemoryAliasStore::new()),
        Arc::new(RecordingSink::default()),
    ))
}

fn steady() -> ScriptedProber {
    ScriptedProber::new().script("a.example", vec![live("a.example", "a.example", 200)])
}

#[tokio::test(start_paused = true)]
async fn test_cancel_lets_running_cycle_finish() {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let prober = SlowProber {
        delay: Duration::from_secs(30),
        inner: steady(),
    };
    let monitor = monitor(prober, snapshots.clone());
    let token = CancellationToken::new();

    let handle = tokio::spawn(run_scheduler(
        monitor,
        Schedule::FixedDelay(Duration::from_secs(300)),
        true,
        token.clone(),
    ));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(snapshots.load().await.unwrap().is_empty());
    token.cancel();

    let cycles = handle.await.unwrap();

    assert_eq!(cycles, 1);
    assert!(snapshots.load().await.unwrap()["a.example"].is_live);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_slot_runs_nothing() {
    let snapshots = Arc::new(MemorySnapshotStore::new());
    let monitor = monitor(steady(), snapshots.clone());
    let token = CancellationToken::new();

    let handle = tokio::spawn(run_scheduler(
        monitor,
        Schedule::FixedDelay(Duration::from_secs(300)),
        false,
        token.clone(),
    ));

    tokio::time::sleep(Duration::from_secs(10)).await;
    token.cancel();

    assert_eq!(handle.await.unwrap(), 0);
    assert!(snapshots.load().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_success_resets_failure_backoff() {
    // Saves 1, 2 and 4 fail.
    let snapshots = Arc::new(TimedSnapshotStore::new(vec![1, 2, 4]));
    let monitor = monitor(steady(), snapshots.clone());
    let token = CancellationToken::new();
    let start = Instant::now();

    let handle = tokio::spawn(run_scheduler(
        monitor,
        Schedule::FixedDelay(Duration::from_secs(100)),
        true,
        token.clone(),
    ));

    tokio::time::sleep(Duration::from_secs(109)).await;
    token.cancel();

    assert_eq!(handle.await.unwrap(), 5);

    let offsets: Vec<u64> = snapshots
        .attempts()
        .iter()
        .map(|at| at.duration_since(start).as_secs())
        .collect();
    // 2s and 4s of backoff, a regular 100s slot, then 2s again.
    assert_eq!(offsets, vec![0, 2, 6, 106, 108]);
}
