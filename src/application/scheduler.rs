//! Cycle scheduling with graceful shutdown.
//!
//! Two strategies are supported, never combined:
//!
//! - [`Schedule::FixedDelay`] waits a fixed interval after each completed cycle
//! - [`Schedule::Aligned`] fires on wall-clock multiples of a period, like a
//!   `*/15 * * * *` cron entry
//!
//! Cancellation is observed only between cycles, so a cycle that has started
//! always runs to completion.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::application::services::MonitorService;

pub const DEFAULT_FIXED_DELAY: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_ALIGNED_PERIOD: Duration = Duration::from_secs(15 * 60);

/// When to run the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    FixedDelay(Duration),
    Aligned(Duration),
}

impl Schedule {
    pub fn interval(&self) -> Duration {
        match self {
            Self::FixedDelay(interval) | Self::Aligned(interval) => *interval,
        }
    }

    /// Time to wait, measured from `now`, before the next regular cycle.
    pub fn delay_from(&self, now: DateTime<Utc>) -> Duration {
        match self {
            Self::FixedDelay(interval) => *interval,
            Self::Aligned(period) => {
                let period_ms = (period.as_millis() as i64).max(1);
                let now_ms = now.timestamp_millis();
                let next_ms = (now_ms.div_euclid(period_ms) + 1) * period_ms;
                Duration::from_millis((next_ms - now_ms) as u64)
            }
        }
    }
}

/// Backoff applied after a failed cycle: 2s, 4s, 8s, ... capped at `cap`.
fn failure_backoff(cap: Duration) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(1000)
        .max_delay(cap.max(Duration::from_secs(1)))
}

/// Runs cycles on `schedule` until `token` is cancelled.
///
/// With `run_on_start` the first cycle starts immediately; otherwise the
/// scheduler waits for the first regular slot. After a failed cycle the next
/// attempt is brought forward using exponential backoff; a successful cycle
/// resets it. Returns the number of cycles run.
pub async fn run_scheduler(
    monitor: Arc<MonitorService>,
    schedule: Schedule,
    run_on_start: bool,
    token: CancellationToken,
) -> u64 {
    let mut backoff = failure_backoff(schedule.interval());
    let mut delay = if run_on_start {
        Duration::ZERO
    } else {
        schedule.delay_from(Utc::now())
    };
    let mut cycles = 0;

    info!(?schedule, run_on_start, "Scheduler started");

    loop {
        select! {
            biased;
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }

        // Not raced against the token: an in-flight cycle always completes.
        let result = monitor.run_cycle().await;
        cycles += 1;

        delay = match result {
            Ok(_) => {
                backoff = failure_backoff(schedule.interval());
                schedule.delay_from(Utc::now())
            }
            Err(e) => {
                let retry_in = backoff.next().unwrap_or_else(|| schedule.interval());
                error!(error = %e, ?retry_in, "Cycle failed, retrying with backoff");
                retry_in
            }
        };
    }

    info!(cycles, "Scheduler stopped");
    cycles
}
