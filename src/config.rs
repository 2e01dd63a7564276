//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the monitor
//! starts. A `.env` file is honored when present (loaded in `main.rs`).
//!
//! ## Required Variables
//!
//! - `SEED_DOMAINS` - Comma-separated list of domains to monitor
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address of the status API (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `STORE_BACKEND` - `json` or `memory` (default: `json`)
//! - `STATE_DIR` - Directory for state files (default: `data`)
//! - `SNAPSHOT_FILE` / `MAPPINGS_FILE` - Override individual state file paths
//! - `PROBE_SCHEME` - `https` or `http` (default: `https`)
//! - `PROBE_TIMEOUT_SECS` - Per-probe timeout (default: 5)
//! - `PROBE_MAX_REDIRECTS` - Redirect hops followed per probe (default: 5)
//! - `PROBE_CONCURRENCY` - Probes in flight at once (default: 1)
//! - `PROBE_USER_AGENT` - User-Agent header sent with probes
//! - `SCHEDULE` - `delay` (wait after each cycle) or `aligned` (clock slots)
//! - `CHECK_INTERVAL_SECS` - Interval (default: 300 for `delay`, 900 for `aligned`)
//! - `RUN_ON_START` - Run a cycle immediately at startup (default: `true`)
//! - `NOTIFIER` - `log`, `webhook` or `none` (default: `log`)
//! - `WEBHOOK_URL` - Target for `NOTIFIER=webhook`

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::scheduler::{DEFAULT_ALIGNED_PERIOD, DEFAULT_FIXED_DELAY, Schedule};
use crate::infrastructure::probe::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ProbeOptions,
};
use crate::utils::hostname::parse_domain_list;

/// Where monitoring state is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Json {
        snapshot_file: PathBuf,
        mappings_file: PathBuf,
    },
    Memory,
}

/// Which notification sink receives change events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierKind {
    Log,
    Webhook { url: String },
    None,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub seed_domains: Vec<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub store: StoreBackend,
    pub probe_scheme: String,
    pub probe_timeout_secs: u64,
    pub probe_max_redirects: usize,
    pub probe_concurrency: usize,
    pub probe_user_agent: String,
    pub schedule: Schedule,
    /// Run the first cycle right after startup instead of waiting a full slot.
    pub run_on_start: bool,
    pub notifier: NotifierKind,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SEED_DOMAINS` is missing or contains an invalid
    /// hostname, or if an enumerated variable has an unknown value.
    pub fn from_env() -> Result<Self> {
        let seed_domains = Self::load_seed_domains()?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let store = Self::load_store_backend()?;

        let probe_scheme = env::var("PROBE_SCHEME").unwrap_or_else(|_| "https".to_string());
        let probe_timeout_secs = parse_var("PROBE_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;
        let probe_max_redirects = parse_var("PROBE_MAX_REDIRECTS", DEFAULT_MAX_REDIRECTS)?;
        let probe_concurrency = parse_var("PROBE_CONCURRENCY", 1)?;
        let probe_user_agent =
            env::var("PROBE_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let schedule = Self::load_schedule()?;

        let run_on_start = env::var("RUN_ON_START")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        let notifier = Self::load_notifier()?;

        Ok(Self {
            seed_domains,
            listen_addr,
            log_level,
            log_format,
            store,
            probe_scheme,
            probe_timeout_secs,
            probe_max_redirects,
            probe_concurrency,
            probe_user_agent,
            schedule,
            run_on_start,
            notifier,
        })
    }

    fn load_seed_domains() -> Result<Vec<String>> {
        let raw = env::var("SEED_DOMAINS").context("SEED_DOMAINS must be set")?;
        parse_domain_list(&raw)
            .map_err(|(entry, e)| anyhow::anyhow!("SEED_DOMAINS entry {entry:?} is invalid: {e}"))
    }

    /// Resolves the state store.
    ///
    /// Priority for each file:
    /// 1. `SNAPSHOT_FILE` / `MAPPINGS_FILE`
    /// 2. `$STATE_DIR/snapshots.json` / `$STATE_DIR/mappings.json`
    fn load_store_backend() -> Result<StoreBackend> {
        let backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "json".to_string());

        match backend.to_ascii_lowercase().as_str() {
            "json" => {
                let state_dir =
                    PathBuf::from(env::var("STATE_DIR").unwrap_or_else(|_| "data".to_string()));
                let snapshot_file = env::var("SNAPSHOT_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| state_dir.join("snapshots.json"));
                let mappings_file = env::var("MAPPINGS_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| state_dir.join("mappings.json"));

                Ok(StoreBackend::Json {
                    snapshot_file,
                    mappings_file,
                })
            }
            "memory" => Ok(StoreBackend::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'json' or 'memory', got '{other}'"),
        }
    }

    fn load_schedule() -> Result<Schedule> {
        let kind = env::var("SCHEDULE").unwrap_or_else(|_| "delay".to_string());
        let interval = match env::var("CHECK_INTERVAL_SECS") {
            Ok(v) => Some(Duration::from_secs(v.trim().parse().map_err(|_| {
                anyhow::anyhow!("CHECK_INTERVAL_SECS must be a number of seconds, got '{v}'")
            })?)),
            Err(_) => None,
        };

        match kind.to_ascii_lowercase().as_str() {
            "delay" => Ok(Schedule::FixedDelay(
                interval.unwrap_or(DEFAULT_FIXED_DELAY),
            )),
            "aligned" => Ok(Schedule::Aligned(
                interval.unwrap_or(DEFAULT_ALIGNED_PERIOD),
            )),
            other => anyhow::bail!("SCHEDULE must be 'delay' or 'aligned', got '{other}'"),
        }
    }

    fn load_notifier() -> Result<NotifierKind> {
        let kind = env::var("NOTIFIER").unwrap_or_else(|_| "log".to_string());

        match kind.to_ascii_lowercase().as_str() {
            "log" => Ok(NotifierKind::Log),
            "none" => Ok(NotifierKind::None),
            "webhook" => {
                let url = env::var("WEBHOOK_URL")
                    .context("WEBHOOK_URL must be set when NOTIFIER=webhook")?;
                Ok(NotifierKind::Webhook { url })
            }
            other => anyhow::bail!("NOTIFIER must be 'log', 'webhook' or 'none', got '{other}'"),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no seed domain is configured
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `probe_scheme` is not `http` or `https`
    /// - a probe limit or the schedule interval is zero or out of range
    /// - the webhook URL is not an HTTP(S) URL
    pub fn validate(&self) -> Result<()> {
        if self.seed_domains.is_empty() {
            anyhow::bail!("SEED_DOMAINS must contain at least one domain");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.probe_scheme != "http" && self.probe_scheme != "https" {
            anyhow::bail!(
                "PROBE_SCHEME must be 'http' or 'https', got '{}'",
                self.probe_scheme
            );
        }

        if self.probe_timeout_secs == 0 || self.probe_timeout_secs > 120 {
            anyhow::bail!(
                "PROBE_TIMEOUT_SECS must be between 1 and 120, got {}",
                self.probe_timeout_secs
            );
        }

        if self.probe_max_redirects > 20 {
            anyhow::bail!(
                "PROBE_MAX_REDIRECTS must be at most 20, got {}",
                self.probe_max_redirects
            );
        }

        if self.probe_concurrency == 0 || self.probe_concurrency > 64 {
            anyhow::bail!(
                "PROBE_CONCURRENCY must be between 1 and 64, got {}",
                self.probe_concurrency
            );
        }

        if self.schedule.interval().is_zero() {
            anyhow::bail!("CHECK_INTERVAL_SECS must be greater than 0");
        }

        if let NotifierKind::Webhook { url } = &self.notifier
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            anyhow::bail!("WEBHOOK_URL must start with 'http://' or 'https://', got '{url}'");
        }

        Ok(())
    }

    /// Options for the HTTP prober derived from this configuration.
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            scheme: self.probe_scheme.clone(),
            timeout: Duration::from_secs(self.probe_timeout_secs),
            max_redirects: self.probe_max_redirects,
            user_agent: self.probe_user_agent.clone(),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Seed domains: {}", self.seed_domains.join(", "));
        tracing::info!("  Listen address: {}", self.listen_addr);
        match &self.store {
            StoreBackend::Json {
                snapshot_file,
                mappings_file,
            } => tracing::info!(
                "  State: {} / {}",
                snapshot_file.display(),
                mappings_file.display()
            ),
            StoreBackend::Memory => tracing::info!("  State: in-memory (not persisted)"),
        }
        tracing::info!(
            "  Probe: {}:// timeout {}s, {} redirects, concurrency {}",
            self.probe_scheme,
            self.probe_timeout_secs,
            self.probe_max_redirects,
            self.probe_concurrency
        );
        tracing::info!("  Schedule: {:?}", self.schedule);
        match &self.notifier {
            NotifierKind::Webhook { url } => {
                tracing::info!("  Notifier: webhook ({})", mask_url(url))
            }
            NotifierKind::Log => tracing::info!("  Notifier: log"),
            NotifierKind::None => tracing::info!("  Notifier: disabled"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a numeric variable, falling back to `default` only when it is unset.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(v) => match v.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => anyhow::bail!("{name} must be a number, got '{v}'"),
        },
        Err(_) => Ok(default),
    }
}

/// Masks the path and query of a webhook URL, which usually embed a secret.
///
/// - `https://hooks.example.com/services/T000/B000/XXXX` → `https://hooks.example.com/***`
fn mask_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}/***", parsed.scheme(), host),
            None => "***".to_string(),
        },
        Err(_) => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
