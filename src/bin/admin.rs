//! CLI administration tool for domain-watch.
//!
//! Runs probes and cycles by hand and inspects stored state without the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Probe a single domain
//! cargo run --bin admin -- probe example.com
//!
//! # Run one full cycle against the configured stores
//! cargo run --bin admin -- cycle
//!
//! # Show stored status
//! cargo run --bin admin -- status
//!
//! # Show discovered redirect mappings
//! cargo run --bin admin -- mappings
//! ```
//!
//! # Environment Variables
//!
//! Same as the service; see `domain_watch::config`. `SEED_DOMAINS` is
//! required for every command except `probe`.

use domain_watch::application::services::{DomainStatus, MonitorError, ReportedStatus};
use domain_watch::config::{self, Config};
use domain_watch::domain::entities::{ChangeKind, HttpStatus};
use domain_watch::infrastructure::probe::{HttpProber, ProbeOptions, Prober};
use domain_watch::server::build_services;
use domain_watch::utils::hostname::normalize_hostname;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing domain-watch.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Probe a single domain and print the snapshot
    Probe {
        /// Domain to probe (e.g., "example.com")
        domain: String,

        /// Use plain HTTP instead of HTTPS
        #[arg(long)]
        http: bool,
    },

    /// Run one full cycle against the configured stores
    Cycle,

    /// Show the stored status of every monitored domain
    Status,

    /// Show discovered redirect mappings
    Mappings,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Probe { domain, http } => handle_probe(&domain, http).await?,
        Commands::Cycle => handle_cycle(&config::load_from_env()?).await?,
        Commands::Status => handle_status(&config::load_from_env()?).await?,
        Commands::Mappings => handle_mappings(&config::load_from_env()?).await?,
    }

    Ok(())
}

/// Probes one domain with default options.
async fn handle_probe(domain: &str, http: bool) -> Result<()> {
    let domain = normalize_hostname(domain).context("Invalid domain")?;

    let mut options = ProbeOptions::default();
    if http {
        options.scheme = "http".to_string();
    }
    let prober = HttpProber::new(options).context("Failed to build HTTP client")?;

    println!("{} {}", "Probing".bright_blue().bold(), domain.cyan());
    println!();

    let outcome = prober.probe(&domain).await;
    let snapshot = outcome.snapshot();

    let state = if snapshot.is_live {
        "LIVE".green().bold()
    } else {
        "DOWN".red().bold()
    };

    println!("  State:    {}", state);
    println!("  Status:   {}", snapshot.http_status.to_string().bright_white());
    println!("  Current:  {}", snapshot.current_domain.cyan());
    if let Some(url) = &snapshot.redirect_url {
        println!("  Redirect: {}", url.yellow());
    }
    if let Some(error) = &snapshot.error_message {
        println!("  Error:    {}", error.red());
    }
    println!();

    Ok(())
}

/// Runs one cycle and prints every non-unchanged event.
async fn handle_cycle(config: &Config) -> Result<()> {
    let services = build_services(config)?;
    let restored = services.monitor.restore().await;

    println!("{}", "Running cycle".bright_blue().bold());
    if restored > 0 {
        println!(
            "  Restored {} domains from mappings",
            restored.to_string().bright_white()
        );
    }
    println!();

    let (report, persist_error) = match services.monitor.run_cycle().await {
        Ok(report) => (report, None),
        Err(MonitorError::Persist { source, report }) => (*report, Some(source)),
    };

    for event in &report.events {
        let tag = match event.kind {
            ChangeKind::Initial => "INITIAL".bright_black(),
            ChangeKind::Changed => "CHANGED".yellow().bold(),
            ChangeKind::Unchanged => "UNCHANGED".normal(),
        };
        println!("  {:<9} {}", tag, event.summary());
    }

    println!();
    println!(
        "  Probed: {}  Changed: {}  Unchanged: {}  Discovered: {}",
        report.probed.to_string().bright_white().bold(),
        report.changed().to_string().bright_white().bold(),
        report.unchanged.to_string().bright_white(),
        report.discovered.len().to_string().bright_white()
    );
    println!();

    if let Some(e) = persist_error {
        println!("{} {}", "State was not saved:".red().bold(), e);
        anyhow::bail!("cycle state could not be persisted");
    }

    Ok(())
}

/// Prints stored status as a table.
///
/// # Output Format
///
/// ```text
/// Domain Status
///
///   Domain                         State  Status   Current                        Last checked
///   ─────────────────────────────────────────────────────────────────────────────────────────
///   old.example.com                LIVE   200      new.example.com                2024-01-15 10:30
///   new.example.com                -      unknown  new.example.com                never
/// ```
async fn handle_status(config: &Config) -> Result<()> {
    let services = build_services(config)?;
    services.monitor.restore().await;

    println!("{}", "Domain Status".bright_blue().bold());
    println!();

    let report = services
        .status
        .report()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read snapshots: {}", e))?;

    println!(
        "  {:<30} {:<6} {:<8} {:<30} {}",
        "Domain".bright_white().bold(),
        "State".bright_white().bold(),
        "Status".bright_white().bold(),
        "Current".bright_white().bold(),
        "Last checked".bright_white().bold()
    );
    println!("  {}", "─".repeat(89).bright_black());

    for status in &report {
        println!(
            "  {:<30} {:<6} {:<8} {:<30} {}",
            status.domain.cyan(),
            state_label(status),
            status_label(status.status),
            status.current_domain,
            status
                .last_checked
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string())
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        report.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_mappings(config: &Config) -> Result<()> {
    let services = build_services(config)?;
    services.monitor.restore().await;

    println!("{}", "Redirect Mappings".bright_blue().bold());
    println!();

    let mappings = services.status.mappings().await;

    if mappings.is_empty() {
        println!("{}", "  No redirects discovered yet".yellow());
        println!();
        return Ok(());
    }

    for (original, current) in &mappings {
        println!("  {} {} {}", original.cyan(), "→".bright_black(), current.green());
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

fn state_label(status: &DomainStatus) -> ColoredString {
    match (status.status, status.is_live) {
        (ReportedStatus::Unknown, _) => "-".bright_black(),
        (_, true) => "LIVE".green(),
        (_, false) => "DOWN".red(),
    }
}

fn status_label(status: ReportedStatus) -> String {
    match status {
        ReportedStatus::Http(HttpStatus::Code(code)) => code.to_string(),
        ReportedStatus::Http(HttpStatus::Error) => "error".to_string(),
        ReportedStatus::Unknown => "unknown".to_string(),
    }
}
