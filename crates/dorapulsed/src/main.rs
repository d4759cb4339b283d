//! dorapulsed — the dorapulse exporter daemon.
//!
//! Single binary that assembles the exporter:
//! - GitHub provider (delivery history)
//! - Metrics collector (periodic fetch → compute → publish)
//! - Snapshot store (the single shared snapshot)
//! - Exposition server (`/metrics`, `/api/v1/snapshot`, `/healthz`)
//!
//! # Usage
//!
//! ```text
//! dorapulsed --owner acme --repo api --token $GITHUB_TOKEN --port 5555
//! ```
//!
//! Every flag falls back to an environment variable, so a `.env`-style
//! deployment works without arguments.

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use dorapulse_core::ExporterConfig;
use dorapulse_github::GithubProvider;
use dorapulse_metrics::{MetricsCollector, SnapshotStore};

#[derive(Parser)]
#[command(name = "dorapulsed", about = "DORA delivery-metrics exporter")]
struct Cli {
    /// Repository owner (user or organization).
    #[arg(long, env = "GITHUB_OWNER")]
    owner: String,

    /// Repository name.
    #[arg(long, env = "GITHUB_REPO")]
    repo: String,

    /// GitHub API token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Port the exposition server binds.
    #[arg(long, env = "DORAPULSE_PORT", default_value = "5555")]
    port: u16,

    /// Seconds between refresh ticks.
    #[arg(long, env = "DORAPULSE_REFRESH_INTERVAL", default_value = "600")]
    refresh_interval: u64,

    /// Lookback window length in days.
    #[arg(long, env = "DORAPULSE_WINDOW_DAYS", default_value = "30")]
    window_days: u32,

    /// Upper bound on the fetch step of a tick, in seconds.
    #[arg(long, env = "DORAPULSE_FETCH_TIMEOUT", default_value = "60")]
    fetch_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dorapulsed=debug,dorapulse=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = ExporterConfig {
        owner: cli.owner,
        repo: cli.repo,
        token: cli.token,
        port: cli.port,
        refresh_interval_secs: cli.refresh_interval,
        window_days: cli.window_days,
        fetch_timeout_secs: cli.fetch_timeout,
    };
    config.validate()?;

    info!(repo = %config.repo_slug(), "dorapulse daemon starting");

    // ── Initialize subsystems ──────────────────────────────────

    let provider = Arc::new(GithubProvider::new(
        &config.owner,
        &config.repo,
        &config.token,
    )?);
    info!("github provider initialized");

    let snapshots = SnapshotStore::new(dorapulse_core::MetricsSnapshot::empty(
        &config.repo_slug(),
        Utc::now(),
    ));

    let collector = MetricsCollector::new(provider, snapshots.clone(), &config);
    info!(
        interval_secs = config.refresh_interval_secs,
        window_days = config.window_days,
        "metrics collector initialized"
    );

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Start background tasks ─────────────────────────────────

    // Refresh loop.
    let collector_handle = tokio::spawn(async move {
        collector.run(shutdown_rx).await;
    });

    // ── Start exposition server ────────────────────────────────

    let router = dorapulse_api::build_router(snapshots);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(%addr, "exposition server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for background tasks.
    let _ = collector_handle.await;

    info!("dorapulse daemon stopped");
    Ok(())
}
