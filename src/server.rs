//! Service wiring and runtime setup.
//!
//! Builds the state stores, prober and notifier from [`Config`], restores
//! the monitored set, then runs the scheduler and the Axum server side by
//! side until Ctrl+C.

use crate::application::scheduler::run_scheduler;
use crate::application::services::{MonitorService, StatusService};
use crate::config::{Config, NotifierKind, StoreBackend};
use crate::domain::registry::DomainRegistry;
use crate::domain::repositories::{AliasStore, SnapshotStore};
use crate::infrastructure::notify::{LogSink, NotificationSink, NullSink, WebhookSink};
use crate::infrastructure::persistence::{
    JsonAliasStore, JsonSnapshotStore, MemoryAliasStore, MemorySnapshotStore,
};
use crate::infrastructure::probe::HttpProber;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Fully wired services sharing one registry and one snapshot store.
pub struct Services {
    pub monitor: Arc<MonitorService>,
    pub status: Arc<StatusService>,
}

/// Builds the monitor and status services described by `config`.
///
/// The registry holds only the seed list; call
/// [`MonitorService::restore`] to replay persisted mappings.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built.
pub fn build_services(config: &Config) -> Result<Services> {
    let registry = Arc::new(RwLock::new(DomainRegistry::new(
        config.seed_domains.iter().map(String::as_str),
    )));

    let (snapshots, aliases): (Arc<dyn SnapshotStore>, Arc<dyn AliasStore>) = match &config.store
    {
        StoreBackend::Json {
            snapshot_file,
            mappings_file,
        } => (
            Arc::new(JsonSnapshotStore::new(snapshot_file)),
            Arc::new(JsonAliasStore::new(mappings_file)),
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory state; nothing survives a restart");
            (
                Arc::new(MemorySnapshotStore::new()),
                Arc::new(MemoryAliasStore::new()),
            )
        }
    };

    let prober =
        Arc::new(HttpProber::new(config.probe_options()).context("Failed to build HTTP prober")?);

    let notifier: Arc<dyn NotificationSink> = match &config.notifier {
        NotifierKind::Log => Arc::new(LogSink),
        NotifierKind::Webhook { url } => {
            Arc::new(WebhookSink::new(url.clone()).context("Failed to build webhook client")?)
        }
        NotifierKind::None => Arc::new(NullSink::new()),
    };

    let monitor = MonitorService::new(
        registry.clone(),
        prober,
        snapshots.clone(),
        aliases,
        notifier,
    )
    .with_concurrency(config.probe_concurrency);

    Ok(Services {
        monitor: Arc::new(monitor),
        status: Arc::new(StatusService::new(registry, snapshots)),
    })
}

/// Runs the monitor and HTTP server with the given configuration.
///
/// Initializes:
/// - State stores, prober and notifier
/// - Monitored set (seed list plus persisted mappings)
/// - Background scheduler
/// - Axum HTTP server
///
/// On Ctrl+C the server stops accepting requests and the scheduler exits
/// after any in-flight cycle completes.
///
/// # Errors
///
/// Returns an error if:
/// - A client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let services = build_services(&config)?;

    services.monitor.restore().await;

    let token = CancellationToken::new();

    let scheduler = tokio::spawn(run_scheduler(
        services.monitor.clone(),
        config.schedule,
        config.run_on_start,
        token.clone(),
    ));

    tokio::spawn(shutdown_signal(token.clone()));

    let state = AppState::new(services.status, services.monitor);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(token.clone().cancelled_owned())
        .await?;

    // The server can also stop on its own; make sure the scheduler follows.
    token.cancel();
    match scheduler.await {
        Ok(cycles) => tracing::info!(cycles, "Shutdown complete"),
        Err(e) => tracing::error!(error = %e, "Scheduler task failed"),
    }

    Ok(())
}

/// Cancels `token` on Ctrl+C.
async fn shutdown_signal(token: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, finishing current cycle"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
    }
    token.cancel();
}
