//! fizzbuzzd — the fizzbuzz service daemon.
//!
//! Single binary that assembles the service:
//! - Frequency ledger (redb)
//! - Request metrics collector
//! - REST API
//!
//! # Usage
//!
//! ```text
//! fizzbuzzd serve --port 8080 --data-dir /var/lib/fizzbuzz
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "fizzbuzzd", about = "FizzBuzz service daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Data directory for the persistent frequency ledger.
        #[arg(long, default_value = "/var/lib/fizzbuzz")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fizzbuzzd=debug,fizzbuzz=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, data_dir } => serve(port, data_dir).await,
    }
}

async fn serve(port: u16, data_dir: PathBuf) -> anyhow::Result<()> {
    info!("fizzbuzz daemon starting");

    // Ensure data directory exists.
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("stats.redb");

    // Frequency ledger.
    let ledger = fizzbuzz_state::StatsStore::open(&db_path)?;
    info!(path = ?db_path, "stats store opened");

    // Metrics collector.
    let metrics = fizzbuzz_metrics::RequestMetrics::new();
    info!("metrics collector initialized");

    // ── Start API server ───────────────────────────────────────

    let router = fizzbuzz_api::build_router(ledger, metrics);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
    });

    server.await?;

    info!("fizzbuzz daemon stopped");
    Ok(())
}
